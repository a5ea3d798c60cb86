//! The User-Agent sent on every catalog request.
//!
//! The catalog site serves its listing and download pages to desktop browsers,
//! so the crawler identifies as one for listing, detail, and file requests alike.

/// Desktop Chrome on macOS.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.114 Safari/537.36";
