//! Crawl state machine over (letter, page).

/// Where the crawl is.
///
/// The crawler threads one of these through each step; there is no other
/// mutable position state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    /// Fetch and process the listing page for `letter` at `page`.
    ScanningPage {
        /// Current letter.
        letter: char,
        /// 1-based page index.
        page: u32,
    },
    /// `page` was processed and had entries; move to the next page.
    AdvancePage {
        /// Current letter.
        letter: char,
        /// The page just processed.
        page: u32,
    },
    /// `letter` is exhausted; move to the next letter.
    NextLetter {
        /// The exhausted letter.
        letter: char,
    },
    /// Every letter has been crawled.
    Done,
}

impl CrawlState {
    /// The initial state for a crawl over `letters`.
    #[must_use]
    pub fn start(letters: &[char]) -> Self {
        match letters.first() {
            Some(&letter) => Self::ScanningPage { letter, page: 1 },
            None => Self::Done,
        }
    }

    /// The state after leaving `current`: page 1 of the first letter that
    /// sorts after it, or [`CrawlState::Done`] when there is none.
    ///
    /// Letters only ever move forward, so a run ends even when `letters`
    /// repeats one.
    #[must_use]
    pub fn after_letter(letters: &[char], current: char) -> Self {
        letters
            .iter()
            .copied()
            .find(|&l| l > current)
            .map_or(Self::Done, |letter| Self::ScanningPage { letter, page: 1 })
    }

    /// Whether this is the terminal state.
    #[must_use]
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}
