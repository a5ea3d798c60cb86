//! Error types for catalog site configuration.

use thiserror::Error;

/// Errors raised while building a [`CatalogSite`](super::CatalogSite).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The base URL is not an absolute http(s) URL with a host.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected base URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The catalog path carries a query string or fragment.
    #[error("invalid catalog path '{path}': expected a plain path such as /en/consoles/dendy/roms")]
    InvalidCatalogPath {
        /// The rejected path.
        path: String,
    },
}

impl CatalogError {
    /// Creates an invalid base URL error.
    pub fn invalid_base_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
