use thiserror::Error;

/// Failure of the fetch collaborator for a single page.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Browser task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

// headless_chrome reports everything through anyhow
impl From<anyhow::Error> for FetchError {
    fn from(value: anyhow::Error) -> Self {
        FetchError::Browser(value.to_string())
    }
}

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to open fetch session: {0}")]
    Session(#[source] FetchError),

    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
}

pub type Result<T> = std::result::Result<T, CrawlError>;
