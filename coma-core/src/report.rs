// Rendering of crawl progress and per-page results

use coma_scanner::result::{CrawlSummary, PageReport};
use colored::Colorize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

pub fn format_visiting(url: &str) -> String {
    format!("Visiting: {}", url)
}

/// Text block for one page: header line, one item per line, blank line.
pub fn format_page_report(report: &PageReport) -> String {
    let mut block = format!(
        "Found {} {} in {}:\n",
        report.count.to_string().green(),
        report.mode.item_kind(),
        report.url.as_str().green()
    );
    for item in &report.items {
        block.push_str(item);
        block.push('\n');
    }
    block.push('\n');
    block
}

/// One JSON object per page, newline-free.
pub fn format_page_json(report: &PageReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

pub fn format_summary(summary: &CrawlSummary) -> String {
    format!(
        "{} Crawl complete! {} pages visited, {} items found",
        "✓".green().bold(),
        summary.visited.len().to_string().cyan(),
        summary.items_found.to_string().cyan()
    )
}
