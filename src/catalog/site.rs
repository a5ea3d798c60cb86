//! Catalog site addressing and pagination end detection.

use tracing::{debug, info, instrument};
use url::Url;

use super::error::CatalogError;
use crate::fetch::{FetchedPage, HttpClient};

/// Origin of the public ROM catalog.
pub const DEFAULT_BASE_URL: &str = "https://www.emu-land.net";

/// Listing path prefix for the Dendy/NES section of the catalog.
pub const DEFAULT_CATALOG_PATH: &str = "/en/consoles/dendy/roms";

/// Result of fetching one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingOutcome {
    /// The page exists; carries its HTML.
    Page(String),
    /// The site bounced an out-of-range page back to the letter's first page.
    EndOfList,
    /// The fetch failed or returned a non-success status.
    Unavailable,
}

impl ListingOutcome {
    /// Returns the page HTML, or `None` for both terminal outcomes.
    #[must_use]
    pub fn into_html(self) -> Option<String> {
        match self {
            Self::Page(html) => Some(html),
            Self::EndOfList | Self::Unavailable => None,
        }
    }
}

/// Addressing for one catalog: where listings live and how links resolve.
///
/// Listing URLs follow the site's scheme: page 1 of a letter is
/// `<origin><catalog path>/<letter>`, later pages append `/<page>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSite {
    origin: Url,
    catalog_path: String,
}

impl Default for CatalogSite {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self {
            origin: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"), // Static, safe to panic
            catalog_path: DEFAULT_CATALOG_PATH.to_string(),
        }
    }
}

impl CatalogSite {
    /// Creates a site from a base URL (scheme + host, optional port) and a
    /// listing path prefix.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if `base_url` is not an absolute http(s) URL
    /// with a host, or if `catalog_path` contains a query or fragment.
    pub fn new(base_url: &str, catalog_path: &str) -> Result<Self, CatalogError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| CatalogError::invalid_base_url(base_url, e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::invalid_base_url(
                base_url,
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }
        if parsed.host_str().is_none() {
            return Err(CatalogError::invalid_base_url(base_url, "missing host"));
        }

        let mut origin = parsed;
        origin.set_path("/");
        origin.set_query(None);
        origin.set_fragment(None);

        Ok(Self {
            origin,
            catalog_path: normalize_catalog_path(catalog_path)?,
        })
    }

    /// The site origin used to resolve relative links.
    #[must_use]
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// The normalized listing path prefix (leading slash, no trailing slash).
    #[must_use]
    pub fn catalog_path(&self) -> &str {
        &self.catalog_path
    }

    /// Builds the listing URL for `letter` at `page` (1-based).
    #[must_use]
    pub fn listing_url(&self, letter: char, page: u32) -> String {
        let base = self.letter_base_url(letter);
        if page <= 1 {
            base
        } else {
            format!("{base}/{page}")
        }
    }

    /// The first-page listing URL for `letter`.
    #[must_use]
    pub fn letter_base_url(&self, letter: char) -> String {
        let origin = self.origin.as_str().trim_end_matches('/');
        format!("{origin}{}/{letter}", self.catalog_path)
    }

    /// Whether `final_url` is the letter's first listing page, with or
    /// without a trailing slash.
    ///
    /// Only the path is compared. The site may bounce between `www.` and bare
    /// hosts while redirecting, so host, scheme, port and query are ignored.
    #[must_use]
    pub fn is_letter_base_url(&self, letter: char, final_url: &Url) -> bool {
        let expected_path = format!("{}/{letter}", self.catalog_path);
        final_url.path().trim_end_matches('/') == expected_path
    }

    /// Resolves a possibly relative link against the site origin.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Option<Url> {
        match self.origin.join(raw) {
            Ok(url) => Some(url),
            Err(error) => {
                debug!(link = raw, error = %error, "unresolvable link");
                None
            }
        }
    }

    /// Decides what a listing fetch for (`letter`, `page`) amounts to.
    ///
    /// Pages past the first are checked for a redirect back to the letter's
    /// first page; the first page never is.
    #[must_use]
    pub fn classify_listing(
        &self,
        letter: char,
        page: u32,
        fetched: Option<FetchedPage>,
    ) -> ListingOutcome {
        let Some(fetched) = fetched else {
            return ListingOutcome::Unavailable;
        };
        if page > 1 && self.is_letter_base_url(letter, &fetched.final_url) {
            info!(
                letter = %letter,
                page,
                final_url = %fetched.final_url,
                "redirected to the letter's first page, assuming end of list"
            );
            return ListingOutcome::EndOfList;
        }
        ListingOutcome::Page(fetched.body)
    }

    /// Fetches one listing page and classifies the result.
    #[instrument(level = "debug", skip(self, client))]
    pub async fn fetch_listing(
        &self,
        client: &HttpClient,
        letter: char,
        page: u32,
    ) -> ListingOutcome {
        let url = self.listing_url(letter, page);
        info!(url = %url, "processing listing page");
        let fetched = client.fetch_text(&url).await;
        self.classify_listing(letter, page, fetched)
    }
}

fn normalize_catalog_path(raw: &str) -> Result<String, CatalogError> {
    let trimmed = raw.trim();
    if trimmed.contains(['?', '#']) {
        return Err(CatalogError::InvalidCatalogPath {
            path: raw.to_string(),
        });
    }
    let trimmed = trimmed.trim_matches('/');
    if trimmed.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("/{trimmed}"))
    }
}
