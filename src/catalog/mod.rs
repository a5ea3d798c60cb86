//! Catalog site model: listing URLs, pagination end detection, and link
//! extraction from listing and detail pages.

mod error;
mod extract;
mod site;

pub use error::CatalogError;
pub use extract::{DownloadLink, extract_download_links, extract_entry_refs};
pub use site::{CatalogSite, DEFAULT_BASE_URL, DEFAULT_CATALOG_PATH, ListingOutcome};
