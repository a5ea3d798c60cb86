//! Catalog Crawler Core Library
//!
//! This library walks an alphabetic, paginated ROM catalog site and mirrors
//! every downloadable file it lists into a local directory, skipping files
//! that are already present.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`fetch`] - HTTP page fetching with a fixed browser User-Agent
//! - [`catalog`] - Listing URLs, pagination end detection, and link extraction
//! - [`download`] - Download-if-absent with write-then-rename semantics
//! - [`crawl`] - The letter/page state machine and run statistics

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod crawl;
pub mod download;
pub mod fetch;
pub(crate) mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use catalog::{
    CatalogError, CatalogSite, DEFAULT_BASE_URL, DEFAULT_CATALOG_PATH, DownloadLink,
    ListingOutcome, extract_download_links, extract_entry_refs,
};
pub use crawl::{
    CrawlState, CrawlStats, Crawler, DEFAULT_MAX_PAGES_PER_LETTER, LETTERS, LetterSelectionError,
    PolitenessDelays, parse_letters,
};
pub use download::{DownloadError, DownloadOutcome, download_if_absent, sanitize_filename};
pub use fetch::{FetchError, FetchedPage, HttpClient, HttpClientOptions};
