//! Fixed pauses between outbound requests.
//!
//! The crawl is sequential, so politeness is a plain sleep after each unit of
//! work rather than a per-domain limiter.

use std::time::Duration;

/// Pause after each attempted download (completed or failed).
pub const DOWNLOAD_DELAY: Duration = Duration::from_millis(1000);

/// Pause after each entry's full link set has been processed.
pub const ENTRY_DELAY: Duration = Duration::from_millis(500);

/// Pause before requesting the next listing page of the same letter.
pub const PAGE_DELAY: Duration = Duration::from_millis(1000);

/// The three politeness pauses applied by the crawler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolitenessDelays {
    /// After every download that made a request.
    pub after_download: Duration,
    /// After every entry.
    pub after_entry: Duration,
    /// Between listing pages of one letter.
    pub after_page: Duration,
}

impl Default for PolitenessDelays {
    fn default() -> Self {
        Self {
            after_download: DOWNLOAD_DELAY,
            after_entry: ENTRY_DELAY,
            after_page: PAGE_DELAY,
        }
    }
}

impl PolitenessDelays {
    /// No pauses at all. For tests against local mock servers.
    #[must_use]
    pub fn none() -> Self {
        Self {
            after_download: Duration::ZERO,
            after_entry: Duration::ZERO,
            after_page: Duration::ZERO,
        }
    }
}

pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
