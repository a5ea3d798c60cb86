//! The crawl loop: letters, pages, entries, links, in that order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use url::Url;

use super::letters::LETTERS;
use super::politeness::{PolitenessDelays, pause};
use super::state::CrawlState;
use super::stats::CrawlStats;
use crate::catalog::{CatalogSite, DownloadLink, extract_download_links, extract_entry_refs};
use crate::download::{DownloadOutcome, download_if_absent};
use crate::fetch::HttpClient;

/// Upper bound on pages per letter, for sites that neither redirect nor empty out.
pub const DEFAULT_MAX_PAGES_PER_LETTER: u32 = 1000;

/// Sequential catalog crawler.
///
/// One request is in flight at a time. Failures of individual entry pages and
/// downloads are logged and counted; nothing short of process termination
/// stops a run early.
///
/// # Example
///
/// ```no_run
/// use crawler_core::{CatalogSite, Crawler, HttpClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::with_defaults()?;
/// let crawler = Crawler::new(client, CatalogSite::default(), "roms");
/// let stats = crawler.run().await;
/// println!("{} downloaded, {} skipped", stats.downloaded(), stats.skipped());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Crawler {
    client: HttpClient,
    site: CatalogSite,
    output_dir: PathBuf,
    letters: Vec<char>,
    delays: PolitenessDelays,
    max_pages_per_letter: u32,
    stats: Arc<CrawlStats>,
}

impl Crawler {
    /// Creates a crawler over all 26 letters with the standard delays.
    ///
    /// `output_dir` must already exist.
    pub fn new(client: HttpClient, site: CatalogSite, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            site,
            output_dir: output_dir.into(),
            letters: LETTERS.to_vec(),
            delays: PolitenessDelays::default(),
            max_pages_per_letter: DEFAULT_MAX_PAGES_PER_LETTER,
            stats: Arc::new(CrawlStats::new()),
        }
    }

    /// Restricts the crawl to `letters`. They are crawled in a–z order, each
    /// at most once.
    #[must_use]
    pub fn with_letters(mut self, mut letters: Vec<char>) -> Self {
        letters.sort_unstable();
        letters.dedup();
        self.letters = letters;
        self
    }

    /// Overrides the politeness delays.
    #[must_use]
    pub fn with_delays(mut self, delays: PolitenessDelays) -> Self {
        self.delays = delays;
        self
    }

    /// Overrides the per-letter page cap.
    #[must_use]
    pub fn with_max_pages_per_letter(mut self, max_pages: u32) -> Self {
        self.max_pages_per_letter = max_pages.max(1);
        self
    }

    /// Live counters for this crawler.
    #[must_use]
    pub fn stats(&self) -> Arc<CrawlStats> {
        Arc::clone(&self.stats)
    }

    /// The directory files are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Runs the crawl to completion.
    pub async fn run(&self) -> Arc<CrawlStats> {
        info!(
            letters = self.letters.len(),
            output_dir = %self.output_dir.display(),
            "starting crawl"
        );

        let mut state = CrawlState::start(&self.letters);
        while !state.is_done() {
            state = self.step(state).await;
        }

        info!(
            listing_pages = self.stats.listing_pages(),
            entries = self.stats.entries(),
            downloaded = self.stats.downloaded(),
            skipped = self.stats.skipped(),
            failed = self.stats.failed(),
            "crawl finished"
        );
        self.stats()
    }

    /// Performs one transition of the state machine.
    pub async fn step(&self, state: CrawlState) -> CrawlState {
        match state {
            CrawlState::ScanningPage { letter, page } => self.scan_page(letter, page).await,
            CrawlState::AdvancePage { letter, page } => {
                pause(self.delays.after_page).await;
                CrawlState::ScanningPage {
                    letter,
                    page: page.saturating_add(1),
                }
            }
            CrawlState::NextLetter { letter } => CrawlState::after_letter(&self.letters, letter),
            CrawlState::Done => CrawlState::Done,
        }
    }

    #[instrument(level = "debug", skip(self))]
    async fn scan_page(&self, letter: char, page: u32) -> CrawlState {
        if page == 1 {
            info!(letter = %letter.to_ascii_uppercase(), "starting letter");
        }
        if page > self.max_pages_per_letter {
            warn!(
                letter = %letter,
                max_pages = self.max_pages_per_letter,
                "page cap reached, moving to next letter"
            );
            return CrawlState::NextLetter { letter };
        }

        self.stats.record_position(letter, page);
        self.stats.record_listing_page();

        let Some(html) = self
            .site
            .fetch_listing(&self.client, letter, page)
            .await
            .into_html()
        else {
            info!(letter = %letter, page, "no listing (or redirected), moving to next letter");
            return CrawlState::NextLetter { letter };
        };

        let entries = extract_entry_refs(&html, &self.site);
        if entries.is_empty() {
            info!(letter = %letter, page, "no entries found, moving to next letter");
            return CrawlState::NextLetter { letter };
        }

        debug!(letter = %letter, page, entries = entries.len(), "processing entries");
        for entry in &entries {
            self.process_entry(entry).await;
            pause(self.delays.after_entry).await;
        }

        CrawlState::AdvancePage { letter, page }
    }

    #[instrument(level = "debug", skip(self, entry), fields(entry = %entry))]
    async fn process_entry(&self, entry: &Url) {
        self.stats.record_entry();
        let Some(detail) = self.client.fetch_text(entry.as_str()).await else {
            self.stats.record_entry_failure();
            return;
        };

        let links = extract_download_links(&detail.body, &self.site);
        if links.is_empty() {
            debug!("entry page lists no downloads");
        }
        for link in &links {
            self.process_link(link).await;
        }
    }

    async fn process_link(&self, link: &DownloadLink) {
        let Some(file_name) = link.file_name() else {
            warn!(
                url = %link.url,
                display_name = %link.display_name,
                "unusable file name, skipping link"
            );
            self.stats.record_failed();
            return;
        };

        let target = self.output_dir.join(file_name);
        let outcome = download_if_absent(&self.client, &link.url, &target).await;
        match &outcome {
            DownloadOutcome::Downloaded { bytes } => self.stats.record_downloaded(*bytes),
            DownloadOutcome::Skipped => self.stats.record_skipped(),
            DownloadOutcome::Failed(_) => self.stats.record_failed(),
        }
        if outcome.was_attempted() {
            pause(self.delays.after_download).await;
        }
    }
}
