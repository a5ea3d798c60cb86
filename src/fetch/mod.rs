//! Page fetching for listing and detail pages.
//!
//! # Example
//!
//! ```no_run
//! use crawler_core::fetch::HttpClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::with_defaults()?;
//! if let Some(page) = client.fetch_text("https://example.com/roms/a").await {
//!     println!("{} bytes from {}", page.body.len(), page.final_url);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, FetchedPage, HttpClient,
    HttpClientOptions,
};
pub use error::FetchError;
