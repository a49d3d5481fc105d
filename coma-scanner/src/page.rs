use scraper::Html;
use tracing::debug;

/// A parsed page: the navigable node tree built from raw markup.
///
/// Parsing follows the HTML5 algorithm and never fails; recoverable
/// markup problems are only logged.
pub struct Page {
    document: Html,
}

impl Page {
    pub fn parse(markup: &str) -> Self {
        let document = Html::parse_document(markup);
        if !document.errors.is_empty() {
            debug!("Parser recovered from {} markup error(s)", document.errors.len());
        }
        Self { document }
    }

    pub fn document(&self) -> &Html {
        &self.document
    }
}
