use crate::error::FetchError;
use headless_chrome::{Browser, LaunchOptions, Tab};
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Source of raw page markup.
///
/// A fetcher is opened once per crawl, owned by the crawler and released
/// through [`Fetcher::close`] exactly once, whether the crawl finished or
/// aborted.
pub trait Fetcher {
    fn fetch(&mut self, url: &Url) -> impl Future<Output = Result<String, FetchError>>;

    fn close(self) -> impl Future<Output = ()>;
}

/// Headless Chrome session with a single reused tab.
///
/// Markup is read from the live DOM once navigation settles, so content
/// rendered client-side is included.
pub struct BrowserFetcher {
    browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserFetcher {
    /// Starts Chrome off the async runtime; startup can take seconds.
    pub async fn launch(timeout: Duration) -> Result<Self, FetchError> {
        tokio::task::spawn_blocking(move || Self::launch_blocking(timeout)).await?
    }

    fn launch_blocking(timeout: Duration) -> Result<Self, FetchError> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .devtools(false)
            // an idle session must outlive the slowest page load
            .idle_browser_timeout(timeout.max(Duration::from_secs(30)) * 2)
            .build()
            .map_err(|e| FetchError::Browser(e.to_string()))?;
        let browser = Browser::new(options)?;
        let tab = browser.new_tab()?;
        tab.set_default_timeout(timeout);
        debug!("Browser session opened");
        Ok(Self { browser, tab })
    }
}

impl Fetcher for BrowserFetcher {
    fn fetch(&mut self, url: &Url) -> impl Future<Output = Result<String, FetchError>> {
        let tab = Arc::clone(&self.tab);
        let target = url.to_string();
        async move {
            let markup = tokio::task::spawn_blocking(move || -> anyhow::Result<String> {
                tab.navigate_to(&target)?.wait_until_navigated()?;
                tab.get_content()
            })
            .await??;
            Ok::<String, FetchError>(markup)
        }
    }

    async fn close(self) {
        let Self { browser, tab } = self;
        let shutdown = tokio::task::spawn_blocking(move || {
            if let Err(e) = tab.close(true) {
                warn!("Failed to close browser tab: {}", e);
            }
            // dropping the browser terminates the chrome process
            drop(browser);
        })
        .await;
        if let Err(e) = shutdown {
            warn!("Browser shutdown task failed: {}", e);
        }
        debug!("Browser session closed");
    }
}

/// Plain HTTP fetcher. No script execution, but no browser required.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("coma/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(timeout / 2)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&mut self, url: &Url) -> Result<String, FetchError> {
        let response = self.client.get(url.as_str()).send().await?;

        // An error page is still a page, the same way a browser renders it
        let status = response.status();
        if !status.is_success() {
            warn!("{} answered {}", url, status);
        }

        Ok(response.text().await?)
    }

    async fn close(self) {
        debug!("HTTP client released");
    }
}
