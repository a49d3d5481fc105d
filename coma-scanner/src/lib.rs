pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod frontier;
pub mod page;
pub mod result;
pub mod scope;

pub use crawler::{Crawler, ProgressCallback, ResultCallback};
pub use error::{CrawlError, FetchError};
pub use extract::{ExtractionMode, ExtractionResult, Extractor};
pub use fetch::{BrowserFetcher, Fetcher, HttpFetcher};
pub use result::{CrawlSummary, PageReport};
pub use scope::{DomainScope, belongs_to_scope};
