//! HTTP client wrapper shared by page fetches and file downloads.
//!
//! One `reqwest::Client` is built per run so connections are pooled across the
//! whole crawl. Every request carries the browser User-Agent and follows
//! redirects; the final URL is kept so the catalog layer can spot the site
//! bouncing an out-of-range page back to page 1.

use std::time::Duration;

use reqwest::Client;
use reqwest::redirect::Policy;
use tracing::{debug, instrument, warn};
use url::Url;

use super::error::FetchError;
use crate::user_agent::BROWSER_USER_AGENT;

/// Default HTTP connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default whole-request timeout (5 minutes, large ROM archives included).
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 300;

/// Maximum redirect hops followed per request.
const MAX_REDIRECTS: usize = 10;

/// Construction options for [`HttpClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientOptions {
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds (covers streaming the body).
    pub read_timeout_secs: u64,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

/// A fetched HTML page together with the URL it was finally served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL after all redirects were followed.
    pub final_url: Url,
    /// Response body decoded as text.
    pub body: String,
}

/// HTTP client for catalog pages and file downloads.
///
/// Cheap to clone; clones share the connection pool and cookie store.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with the given timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the TLS backend or resolver
    /// cannot be initialized.
    pub fn new(options: HttpClientOptions) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(options.connect_timeout_secs))
            .timeout(Duration::from_secs(options.read_timeout_secs))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .cookie_store(true)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|source| FetchError::ClientBuild { source })?;
        Ok(Self { client })
    }

    /// Creates a client with default timeouts.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::new`].
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(HttpClientOptions::default())
    }

    /// Fetches `url` as text, following redirects.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, timeout, or a non-success
    /// status.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        let final_url = response.url().clone();
        if final_url.as_str() != url {
            debug!(final_url = %final_url, "request was redirected");
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        Ok(FetchedPage { final_url, body })
    }

    /// Fetches `url`, logging and swallowing any failure.
    ///
    /// `None` means "nothing here": callers treat it exactly like an empty page.
    pub async fn fetch_text(&self, url: &str) -> Option<FetchedPage> {
        match self.fetch_page(url).await {
            Ok(page) => Some(page),
            Err(error) => {
                warn!(url, error = %error, "fetch failed");
                None
            }
        }
    }

    /// Returns a reference to the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}
