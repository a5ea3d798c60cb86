//! Run counters, shared with the progress spinner while the crawl runs.

use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};

/// Counters for one crawl run.
///
/// Wrapped in `Arc` by the crawler so a progress reporter can read it while
/// the crawl is in flight.
#[derive(Debug, Default)]
pub struct CrawlStats {
    listing_pages: AtomicUsize,
    entries: AtomicUsize,
    entry_failures: AtomicUsize,
    downloaded: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
    bytes: AtomicU64,
    current_letter: AtomicU32,
    current_page: AtomicU32,
}

impl CrawlStats {
    /// Creates a stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listing pages fetched, including the terminating one per letter.
    #[must_use]
    pub fn listing_pages(&self) -> usize {
        self.listing_pages.load(Ordering::SeqCst)
    }

    /// Entry (detail) pages visited.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.entries.load(Ordering::SeqCst)
    }

    /// Entry pages that could not be fetched.
    #[must_use]
    pub fn entry_failures(&self) -> usize {
        self.entry_failures.load(Ordering::SeqCst)
    }

    /// Files downloaded and moved into place.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.downloaded.load(Ordering::SeqCst)
    }

    /// Links skipped because the file already existed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::SeqCst)
    }

    /// Links whose download failed or whose name was unusable.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// Total bytes written to completed files.
    #[must_use]
    pub fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::SeqCst)
    }

    /// Letter and page currently being scanned, if the crawl has started.
    #[must_use]
    pub fn position(&self) -> Option<(char, u32)> {
        let letter = char::from_u32(self.current_letter.load(Ordering::SeqCst))
            .filter(|c| *c != '\0')?;
        Some((letter, self.current_page.load(Ordering::SeqCst)))
    }

    pub(crate) fn record_position(&self, letter: char, page: u32) {
        self.current_letter.store(u32::from(letter), Ordering::SeqCst);
        self.current_page.store(page, Ordering::SeqCst);
    }

    pub(crate) fn record_listing_page(&self) {
        self.listing_pages.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_entry(&self) {
        self.entries.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_entry_failure(&self) {
        self.entry_failures.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_downloaded(&self, bytes: u64) {
        self.downloaded.fetch_add(1, Ordering::SeqCst);
        self.bytes.fetch_add(bytes, Ordering::SeqCst);
    }

    pub(crate) fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }
}
