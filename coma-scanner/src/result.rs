use crate::extract::{ExtractionMode, ExtractionResult};
use serde::Serialize;
use url::Url;

/// What a single visited page produced, ready for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    pub url: String,
    pub mode: ExtractionMode,
    pub count: usize,
    pub items: Vec<String>,
}

impl PageReport {
    pub fn new(url: &Url, result: &ExtractionResult) -> Self {
        Self {
            url: url.to_string(),
            mode: result.mode(),
            count: result.len(),
            items: result.items(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    /// Visited URLs in the order they were fetched.
    pub visited: Vec<String>,
    pub items_found: usize,
}
