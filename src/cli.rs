//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use crawler_core::{DEFAULT_BASE_URL, DEFAULT_CATALOG_PATH};

/// Default directory downloads are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "roms";

/// Mirror every downloadable file of an alphabetic ROM catalog.
///
/// Walks the catalog letter by letter and page by page, visits each entry,
/// and downloads every file it links to unless a file of the same name is
/// already present in the output directory. Safe to re-run: finished files
/// are never fetched twice.
#[derive(Parser, Debug)]
#[command(name = "catalog-crawler")]
#[command(author, version, about)]
pub struct Args {
    /// Directory to write downloaded files into (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Catalog site origin (scheme, host and optional port)
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Listing path prefix; letter and page are appended to it
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    pub catalog_path: String,

    /// Only crawl these letters, e.g. "abc" or "x,y,z" (default: a-z)
    #[arg(long)]
    pub letters: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,

    /// Read defaults from this config file instead of the standard location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
