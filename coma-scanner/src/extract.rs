use crate::page::Page;
use crate::scope::DomainScope;
use scraper::Node;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use url::Url;

/// Which artifact is pulled out of every visited page. Fixed for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    Comments,
    Text,
    Links,
}

impl ExtractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMode::Comments => "comments",
            ExtractionMode::Text => "text",
            ExtractionMode::Links => "links",
        }
    }

    /// Plural noun used when reporting how many items a page produced.
    pub fn item_kind(&self) -> &'static str {
        match self {
            ExtractionMode::Comments => "comments",
            ExtractionMode::Text => "text items",
            ExtractionMode::Links => "links",
        }
    }

    /// Builds the extractor for this mode. Links are always resolved and
    /// scoped against `seed`, so the scope cannot drift during a crawl.
    pub fn extractor(&self, seed: &Url) -> Box<dyn Extractor> {
        match self {
            ExtractionMode::Comments => Box::new(CommentExtractor),
            ExtractionMode::Text => Box::new(TextExtractor),
            ExtractionMode::Links => Box::new(LinkExtractor::new(seed.clone())),
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "comments" => Ok(ExtractionMode::Comments),
            "text" => Ok(ExtractionMode::Text),
            "links" => Ok(ExtractionMode::Links),
            other => Err(format!(
                "unknown extraction mode '{}' (expected comments, text or links)",
                other
            )),
        }
    }
}

/// Items extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    /// Comment bodies in document order, duplicates kept.
    Comments(Vec<String>),
    /// Stripped, non-empty text fragments in document order, duplicates kept.
    Texts(Vec<String>),
    /// Absolute same-domain link targets.
    Links(HashSet<Url>),
}

impl ExtractionResult {
    pub fn mode(&self) -> ExtractionMode {
        match self {
            ExtractionResult::Comments(_) => ExtractionMode::Comments,
            ExtractionResult::Texts(_) => ExtractionMode::Text,
            ExtractionResult::Links(_) => ExtractionMode::Links,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ExtractionResult::Comments(items) | ExtractionResult::Texts(items) => items.len(),
            ExtractionResult::Links(links) => links.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items rendered as strings. Links come out sorted so reports are stable.
    pub fn items(&self) -> Vec<String> {
        match self {
            ExtractionResult::Comments(items) | ExtractionResult::Texts(items) => items.clone(),
            ExtractionResult::Links(links) => {
                let mut items: Vec<String> = links.iter().map(|u| u.to_string()).collect();
                items.sort();
                items
            }
        }
    }

    pub fn into_links(self) -> Option<HashSet<Url>> {
        match self {
            ExtractionResult::Links(links) => Some(links),
            _ => None,
        }
    }
}

/// Pulls one kind of artifact out of a parsed page.
pub trait Extractor {
    fn extract(&self, page: &Page) -> ExtractionResult;
}

pub struct CommentExtractor;

impl Extractor for CommentExtractor {
    fn extract(&self, page: &Page) -> ExtractionResult {
        let comments = page
            .document()
            .tree
            .root()
            .descendants()
            .filter_map(|node| match node.value() {
                Node::Comment(comment) => {
                    let body: &str = comment;
                    // `<?xml ...?>` and friends arrive as bogus comments
                    if is_processing_instruction(body) {
                        return None;
                    }
                    Some(body.to_string())
                }
                _ => None,
            })
            .collect();
        ExtractionResult::Comments(comments)
    }
}

fn is_processing_instruction(body: &str) -> bool {
    body.len() >= 2 && body.starts_with('?') && body.ends_with('?')
}

// Text under these elements is code or template source, not visible text.
// `noscript` is raw markup to a scripting parser and hidden once scripts run.
const NON_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "template", "noscript"];

pub struct TextExtractor;

impl Extractor for TextExtractor {
    fn extract(&self, page: &Page) -> ExtractionResult {
        let texts = page
            .document()
            .tree
            .root()
            .descendants()
            .filter_map(|node| {
                let Node::Text(text) = node.value() else {
                    return None;
                };
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|el| NON_TEXT_ELEMENTS.contains(&el.name()))
                });
                if hidden {
                    return None;
                }
                let body: &str = text;
                let stripped = body.trim();
                (!stripped.is_empty()).then(|| stripped.to_string())
            })
            .collect();
        ExtractionResult::Texts(texts)
    }
}

/// Collects `<a href>` targets resolved against a base URL and kept only
/// when they stay on the base URL's authority.
///
/// Only the `href` of anchor elements is considered; links built by
/// scripts, form actions and other attributes are not discovered.
pub struct LinkExtractor {
    base: Url,
    scope: DomainScope,
}

impl LinkExtractor {
    pub fn new(base: Url) -> Self {
        let scope = DomainScope::new(&base);
        Self { base, scope }
    }

    fn resolve(&self, href: &str) -> Option<Url> {
        match self.base.join(href) {
            Ok(url) => Some(url),
            Err(e) => {
                debug!("Skipping unresolvable link '{}': {}", href, e);
                None
            }
        }
    }
}

impl Extractor for LinkExtractor {
    fn extract(&self, page: &Page) -> ExtractionResult {
        let links = page
            .document()
            .tree
            .root()
            .descendants()
            .filter_map(|node| node.value().as_element())
            .filter(|el| el.name() == "a")
            .filter_map(|el| el.attr("href"))
            .filter_map(|href| self.resolve(href))
            .filter(|url| {
                let in_scope = self.scope.contains(url);
                if !in_scope {
                    debug!("Out of scope link: {}", url);
                }
                in_scope
            })
            .collect();
        ExtractionResult::Links(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Url {
        Url::parse("http://x.test/").unwrap()
    }

    #[test]
    fn test_comments_in_document_order_with_duplicates() {
        let page = Page::parse(
            "<html><!-- first --><body><p>hi</p><!--dup--><div><!--dup--></div></body></html>",
        );
        let result = CommentExtractor.extract(&page);
        assert_eq!(
            result,
            ExtractionResult::Comments(vec![
                " first ".to_string(),
                "dup".to_string(),
                "dup".to_string()
            ])
        );
    }

    #[test]
    fn test_xml_declaration_is_not_a_comment() {
        let page = Page::parse(
            r#"<?xml version="1.0"?><html><body><!-- real --><?php echo 1 ?></body></html>"#,
        );
        let result = CommentExtractor.extract(&page);
        assert_eq!(result.items(), vec![" real ".to_string()]);
    }

    #[test]
    fn test_page_without_comments_yields_nothing() {
        let page = Page::parse("<p>plain</p>");
        assert!(CommentExtractor.extract(&page).is_empty());
    }

    #[test]
    fn test_text_is_stripped_and_blank_nodes_dropped() {
        let page = Page::parse(
            "<html><head><title> Title </title></head><body>\n  <p>  Hello </p>\n<p>\n</p><p>Hello</p></body></html>",
        );
        let result = TextExtractor.extract(&page);
        assert_eq!(
            result,
            ExtractionResult::Texts(vec![
                "Title".to_string(),
                "Hello".to_string(),
                "Hello".to_string()
            ])
        );
    }

    #[test]
    fn test_text_skips_scripts_styles_and_comments() {
        let page = Page::parse(
            "<html><head><style>p { color: red }</style><script>var a = 1;</script></head>\
             <body><!-- hidden --><p>visible</p></body></html>",
        );
        let result = TextExtractor.extract(&page);
        assert_eq!(result.items(), vec!["visible".to_string()]);
    }

    #[test]
    fn test_noscript_fallback_is_not_visible_text() {
        let page = Page::parse("<noscript><p>enable js</p></noscript><p>ok</p>");
        let result = TextExtractor.extract(&page);
        assert_eq!(result.items(), vec!["ok".to_string()]);
    }

    #[test]
    fn test_links_resolved_and_scoped() {
        let page = Page::parse(
            r#"<a href="/p">p</a><a href="http://other.test/q">q</a><a href="r">r</a>"#,
        );
        let result = LinkExtractor::new(seed()).extract(&page);
        let expected: HashSet<Url> = ["http://x.test/p", "http://x.test/r"]
            .iter()
            .map(|s| Url::parse(s).unwrap())
            .collect();
        assert_eq!(result, ExtractionResult::Links(expected));
    }

    #[test]
    fn test_duplicate_links_collapse() {
        let page = Page::parse(
            r#"<a href="/same">1</a><a href="http://x.test/same">2</a><a href="./same">3</a>"#,
        );
        let result = LinkExtractor::new(seed()).extract(&page);
        assert_eq!(result.len(), 1);
        assert_eq!(result.items(), vec!["http://x.test/same".to_string()]);
    }

    #[test]
    fn test_protocol_relative_and_fragment_links() {
        let page = Page::parse(
            r##"<a href="//x.test/proto">a</a><a href="#frag">b</a><a href="//elsewhere.test/">c</a>"##,
        );
        let items = LinkExtractor::new(seed()).extract(&page).items();
        assert_eq!(
            items,
            vec![
                "http://x.test/#frag".to_string(),
                "http://x.test/proto".to_string()
            ]
        );
    }

    #[test]
    fn test_anchor_without_href_and_other_elements_ignored() {
        let page = Page::parse(
            r#"<a name="top">top</a><link href="/style.css"><form action="/submit"></form>"#,
        );
        assert!(LinkExtractor::new(seed()).extract(&page).is_empty());
    }

    #[test]
    fn test_unresolvable_link_is_skipped() {
        let page = Page::parse(r#"<a href="http://[::1">bad</a><a href="/ok">ok</a>"#);
        let items = LinkExtractor::new(seed()).extract(&page).items();
        assert_eq!(items, vec!["http://x.test/ok".to_string()]);
    }

    #[test]
    fn test_mode_round_trips_through_strings() {
        for mode in [
            ExtractionMode::Comments,
            ExtractionMode::Text,
            ExtractionMode::Links,
        ] {
            assert_eq!(mode.as_str().parse::<ExtractionMode>(), Ok(mode));
        }
        assert!("images".parse::<ExtractionMode>().is_err());
    }

    #[test]
    fn test_extractor_for_mode_matches_mode() {
        let page = Page::parse("<!--c--><p>t</p>");
        for mode in [
            ExtractionMode::Comments,
            ExtractionMode::Text,
            ExtractionMode::Links,
        ] {
            assert_eq!(mode.extractor(&seed()).extract(&page).mode(), mode);
        }
    }
}
