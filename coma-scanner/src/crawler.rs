use crate::error::{CrawlError, Result};
use crate::extract::{ExtractionMode, ExtractionResult, Extractor};
use crate::fetch::Fetcher;
use crate::frontier::Frontier;
use crate::page::Page;
use crate::result::{CrawlSummary, PageReport};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Called with each URL right before it is fetched.
pub type ProgressCallback = Arc<dyn Fn(&Url) + Send + Sync>;
/// Called with each page's extraction as soon as it is available.
pub type ResultCallback = Arc<dyn Fn(&PageReport) + Send + Sync>;

/// Single-domain crawl loop.
///
/// Pops one URL at a time from the frontier, fetches and parses it,
/// runs the extractor for the configured mode and reports the result.
/// Only in links mode do discovered URLs flow back into the frontier.
/// Each distinct URL string is fetched at most once per run.
pub struct Crawler {
    seed: Url,
    mode: ExtractionMode,
    extractor: Box<dyn Extractor>,
    frontier: Frontier,
    visited: HashSet<String>,
    bound: Option<String>,
    max_depth: Option<usize>,
    progress_callback: Option<ProgressCallback>,
    result_callback: Option<ResultCallback>,
}

impl Crawler {
    /// Seeds the frontier with `seed` and every entry of `directories`
    /// resolved against it.
    pub fn new(seed: &str, directories: &[String], mode: ExtractionMode) -> Result<Self> {
        let seed = Url::parse(seed)
            .map_err(|e| CrawlError::InvalidUrl(format!("{}: {}", seed, e)))?;

        let mut frontier = Frontier::new();
        frontier.insert(seed.clone(), 0);
        for directory in directories {
            let url = seed.join(directory).map_err(|e| {
                CrawlError::InvalidUrl(format!(
                    "cannot resolve '{}' against {}: {}",
                    directory, seed, e
                ))
            })?;
            frontier.insert(url, 0);
        }

        Ok(Self {
            extractor: mode.extractor(&seed),
            seed,
            mode,
            frontier,
            visited: HashSet::new(),
            bound: None,
            max_depth: None,
            progress_callback: None,
            result_callback: None,
        })
    }

    /// Only discovered links containing `bound` enter the frontier.
    pub fn with_bound(mut self, bound: String) -> Self {
        self.bound = Some(bound);
        self
    }

    /// Links found on pages `max_depth` hops from the seeds are reported
    /// but not followed. `0` visits only the seeds.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn with_result_callback(mut self, callback: ResultCallback) -> Self {
        self.result_callback = Some(callback);
        self
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Runs the crawl to exhaustion of the frontier.
    ///
    /// The first fetch failure aborts the whole run. The fetcher is closed
    /// before returning on every path.
    pub async fn run<F: Fetcher>(mut self, mut fetcher: F) -> Result<CrawlSummary> {
        let outcome = self.drive(&mut fetcher).await;
        fetcher.close().await;
        outcome
    }

    async fn drive<F: Fetcher>(&mut self, fetcher: &mut F) -> Result<CrawlSummary> {
        info!(
            "Starting {} crawl of {} with {} seed URL(s)",
            self.mode,
            self.seed,
            self.frontier.len()
        );

        let mut summary = CrawlSummary::default();

        while let Some((url, depth)) = self.frontier.pop() {
            // A URL can be queued again after its visit; drop it here
            if !self.visited.insert(url.as_str().to_string()) {
                debug!("Already visited {}", url);
                continue;
            }

            if let Some(ref callback) = self.progress_callback {
                callback(&url);
            }

            let result = self.visit(fetcher, &url).await?;

            let report = PageReport::new(&url, &result);
            if let Some(ref callback) = self.result_callback {
                callback(&report);
            }

            summary.visited.push(report.url);
            summary.items_found += report.count;

            if let Some(links) = result.into_links() {
                if self.max_depth.is_some_and(|max| depth >= max) {
                    debug!("Depth limit reached at {}, not following its links", url);
                } else {
                    self.enqueue(links, depth + 1);
                }
            }
        }

        info!(
            "Crawl complete. Visited {} pages, {} items found",
            summary.visited.len(),
            summary.items_found
        );
        Ok(summary)
    }

    async fn visit<F: Fetcher>(&self, fetcher: &mut F, url: &Url) -> Result<ExtractionResult> {
        debug!("Fetching {}", url);
        let markup = fetcher
            .fetch(url)
            .await
            .map_err(|source| CrawlError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let page = Page::parse(&markup);
        Ok(self.extractor.extract(&page))
    }

    fn enqueue(&mut self, links: HashSet<Url>, depth: usize) {
        let mut links: Vec<Url> = links.into_iter().collect();
        links.sort();

        for link in links {
            if let Some(ref bound) = self.bound
                && !link.as_str().contains(bound.as_str())
            {
                debug!("Out of bound link: {}", link);
                continue;
            }
            // visited links are filtered when popped
            self.frontier.insert(link, depth);
        }
    }
}
