//! Crawl orchestration.
//!
//! A [`Crawler`] walks the letters in order. For each letter it fetches
//! listing pages 1, 2, ... until a page is unavailable, redirects back to the
//! letter's first page, or lists no entries. Every entry's detail page is
//! fetched and each of its download links is fetched unless the target file
//! already exists.

mod crawler;
mod letters;
mod politeness;
mod state;
mod stats;

pub use crawler::{Crawler, DEFAULT_MAX_PAGES_PER_LETTER};
pub use letters::{LETTERS, LetterSelectionError, parse_letters};
pub use politeness::{DOWNLOAD_DELAY, ENTRY_DELAY, PAGE_DELAY, PolitenessDelays};
pub use state::CrawlState;
pub use stats::CrawlStats;
