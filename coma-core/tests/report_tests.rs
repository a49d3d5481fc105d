// Tests for report rendering

use coma_core::report::{
    OutputFormat, format_page_json, format_page_report, format_summary, format_visiting,
};
use coma_scanner::extract::{ExtractionMode, ExtractionResult};
use coma_scanner::result::{CrawlSummary, PageReport};
use std::collections::HashSet;
use url::Url;

fn plain() {
    colored::control::set_override(false);
}

fn seed() -> Url {
    Url::parse("http://x.test/").unwrap()
}

// ============================================================================
// Text Format Tests
// ============================================================================

#[test]
fn test_format_visiting() {
    assert_eq!(format_visiting("http://x.test/a"), "Visiting: http://x.test/a");
}

#[test]
fn test_comment_report_block() {
    plain();
    let result = ExtractionResult::Comments(vec![" a ".to_string(), "b".to_string()]);
    let report = PageReport::new(&seed(), &result);

    assert_eq!(
        format_page_report(&report),
        "Found 2 comments in http://x.test/:\n a \nb\n\n"
    );
}

#[test]
fn test_text_report_uses_text_items_label() {
    plain();
    let result = ExtractionResult::Texts(vec!["Hello".to_string()]);
    let report = PageReport::new(&seed(), &result);

    assert!(format_page_report(&report).starts_with("Found 1 text items in http://x.test/:\n"));
}

#[test]
fn test_empty_report_still_ends_with_blank_line() {
    plain();
    let result = ExtractionResult::Comments(vec![]);
    let report = PageReport::new(&seed(), &result);

    assert_eq!(
        format_page_report(&report),
        "Found 0 comments in http://x.test/:\n\n"
    );
}

#[test]
fn test_link_report_lists_links_sorted() {
    plain();
    let links: HashSet<Url> = ["http://x.test/r", "http://x.test/p"]
        .iter()
        .map(|s| Url::parse(s).unwrap())
        .collect();
    let report = PageReport::new(&seed(), &ExtractionResult::Links(links));

    assert_eq!(
        format_page_report(&report),
        "Found 2 links in http://x.test/:\nhttp://x.test/p\nhttp://x.test/r\n\n"
    );
}

#[test]
fn test_summary_line() {
    plain();
    let summary = CrawlSummary {
        visited: vec!["http://x.test/".to_string(), "http://x.test/a".to_string()],
        items_found: 7,
    };
    assert!(format_summary(&summary).contains("2 pages visited, 7 items found"));
}

// ============================================================================
// JSON Format Tests
// ============================================================================

#[test]
fn test_json_report_shape() {
    let result = ExtractionResult::Texts(vec!["one".to_string(), "one".to_string()]);
    let report = PageReport::new(&seed(), &result);
    let line = format_page_json(&report).unwrap();

    assert!(!line.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["url"], "http://x.test/");
    assert_eq!(value["mode"], "text");
    assert_eq!(value["count"], 2);
    assert_eq!(value["items"][1], "one");
}

#[test]
fn test_output_format_from_str() {
    assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
    assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
    assert!("csv".parse::<OutputFormat>().is_err());
}

#[test]
fn test_mode_labels() {
    assert_eq!(ExtractionMode::Comments.item_kind(), "comments");
    assert_eq!(ExtractionMode::Text.item_kind(), "text items");
    assert_eq!(ExtractionMode::Links.item_kind(), "links");
}
