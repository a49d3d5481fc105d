use crate::report::{OutputFormat, format_page_json, format_page_report, format_visiting};
use coma_scanner::error::CrawlError;
use coma_scanner::result::{CrawlSummary, PageReport};
use coma_scanner::{
    BrowserFetcher, Crawler, ExtractionMode, HttpFetcher, ProgressCallback, ResultCallback,
};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub url: String,
    pub directories: Vec<String>,
    pub mode: ExtractionMode,
    pub fetcher: FetcherKind,
    pub timeout: Duration,
    pub bound: Option<String>,
    /// Hops followed from the seeds in links mode; `None` is unlimited
    pub max_depth: Option<usize>,
}

/// How pages are retrieved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetcherKind {
    /// Headless Chrome, renders client-side content
    Browser,
    /// Plain HTTP GET
    Http,
}

impl FromStr for FetcherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "browser" => Ok(FetcherKind::Browser),
            "http" => Ok(FetcherKind::Http),
            other => Err(format!("unknown fetcher '{}'", other)),
        }
    }
}

/// Callbacks printing progress and results to stdout in the given format
pub fn reporter_callbacks(format: OutputFormat) -> (ProgressCallback, ResultCallback) {
    match format {
        OutputFormat::Text => {
            let progress: ProgressCallback =
                Arc::new(|url: &Url| println!("{}", format_visiting(url.as_str())));
            let result: ResultCallback =
                Arc::new(|report: &PageReport| print!("{}", format_page_report(report)));
            (progress, result)
        }
        OutputFormat::Json => {
            // stdout carries only JSON lines, progress goes to the log
            let progress: ProgressCallback = Arc::new(|url: &Url| info!("Visiting {}", url));
            let result: ResultCallback =
                Arc::new(|report: &PageReport| match format_page_json(report) {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!("Failed to serialize report for {}: {}", report.url, e),
                });
            (progress, result)
        }
    }
}

/// Execute a crawl with the given options
///
/// Seeds are validated before the fetch session is opened; once opened,
/// the session is closed however the crawl ends.
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<ProgressCallback>,
    result_callback: Option<ResultCallback>,
) -> Result<CrawlSummary, CrawlError> {
    let CrawlOptions {
        url,
        directories,
        mode,
        fetcher,
        timeout,
        bound,
        max_depth,
    } = options;

    let mut crawler = Crawler::new(&url, &directories, mode)?;
    if let Some(bound) = bound {
        crawler = crawler.with_bound(bound);
    }
    if let Some(max_depth) = max_depth {
        crawler = crawler.with_max_depth(max_depth);
    }
    if let Some(callback) = progress_callback {
        crawler = crawler.with_progress_callback(callback);
    }
    if let Some(callback) = result_callback {
        crawler = crawler.with_result_callback(callback);
    }

    info!("Opening {:?} fetch session", fetcher);
    match fetcher {
        FetcherKind::Browser => {
            let session = BrowserFetcher::launch(timeout)
                .await
                .map_err(CrawlError::Session)?;
            crawler.run(session).await
        }
        FetcherKind::Http => {
            let session = HttpFetcher::new(timeout).map_err(CrawlError::Session)?;
            crawler.run(session).await
        }
    }
}
