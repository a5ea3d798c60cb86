//! File acquisition: download-if-absent into the output directory.
//!
//! # Features
//!
//! - Skip without any request when the target file already exists
//! - Streaming downloads through a `.part` file, renamed only on success
//! - Content-Length verification before the rename
//! - Filename sanitization for catalog display names
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use crawler_core::download::{DownloadOutcome, download_if_absent};
//! use crawler_core::fetch::HttpClient;
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::with_defaults()?;
//! let url = Url::parse("https://example.com/index.php?act=getmfl&fid=1")?;
//! match download_if_absent(&client, &url, Path::new("roms/Game One.nes")).await {
//!     DownloadOutcome::Downloaded { bytes } => println!("{bytes} bytes"),
//!     DownloadOutcome::Skipped => println!("already have it"),
//!     DownloadOutcome::Failed(error) => eprintln!("{error}"),
//! }
//! # Ok(())
//! # }
//! ```

mod acquire;
mod error;
mod filename;

pub use acquire::{DownloadOutcome, download_if_absent, download_to_path};
pub use error::DownloadError;
pub use filename::{PARTIAL_SUFFIX, partial_path, sanitize_filename};
