//! Link extraction from listing and detail page HTML.
//!
//! The catalog renders entries as `onclick="mgame('<detail url>', ...)"`
//! handlers and file links as anchors pointing at the `act=getmfl` action.
//! Both are matched with regexes over the raw markup; no DOM is built.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};
use url::Url;

use super::site::CatalogSite;
use crate::download::sanitize_filename;

/// First quoted argument of an "open game" click handler.
#[allow(clippy::expect_used)]
static ENTRY_TRIGGER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"onclick="mgame\('([^']*)'"#).expect("entry trigger regex is valid") // Static pattern, safe to panic
});

/// Anchor whose href carries both the file-list action and a file id.
#[allow(clippy::expect_used)]
static DOWNLOAD_ANCHOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a href="([^"]*act=getmfl[^"]*fid=[^"]*)"[^>]*>([^<]*)</a>"#)
        .expect("download anchor regex is valid") // Static pattern, safe to panic
});

/// A downloadable file found on a detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    /// Absolute download URL.
    pub url: Url,
    /// Anchor text as shown on the page (entity-decoded, trimmed).
    pub display_name: String,
}

impl DownloadLink {
    /// The on-disk filename for this link, or `None` if the display name
    /// cannot be used as a single path segment.
    #[must_use]
    pub fn file_name(&self) -> Option<String> {
        sanitize_filename(&self.display_name)
    }
}

/// Extracts detail-page URLs from a listing page, in document order.
///
/// An empty result means the listing has no entries.
#[must_use]
pub fn extract_entry_refs(html: &str, site: &CatalogSite) -> Vec<Url> {
    let refs: Vec<Url> = ENTRY_TRIGGER_PATTERN
        .captures_iter(html)
        .filter_map(|caps| {
            let raw = decode_amp(caps.get(1)?.as_str());
            trace!(link = %raw, "found entry trigger");
            site.resolve(&raw)
        })
        .collect();
    debug!(entries = refs.len(), "extracted entry references");
    refs
}

/// Extracts download links from a detail page, in document order.
#[must_use]
pub fn extract_download_links(html: &str, site: &CatalogSite) -> Vec<DownloadLink> {
    let links: Vec<DownloadLink> = DOWNLOAD_ANCHOR_PATTERN
        .captures_iter(html)
        .filter_map(|caps| {
            let href = decode_amp(caps.get(1)?.as_str());
            let text = caps.get(2).map_or("", |m| m.as_str());
            let url = site.resolve(&href)?;
            Some(DownloadLink {
                url,
                display_name: decode_amp(text).trim().to_string(),
            })
        })
        .collect();
    debug!(links = links.len(), "extracted download links");
    links
}

/// Decodes the `&amp;` entity; the catalog escapes nothing else in links.
fn decode_amp(raw: &str) -> Cow<'_, str> {
    if raw.contains("&amp;") {
        Cow::Owned(raw.replace("&amp;", "&"))
    } else {
        Cow::Borrowed(raw)
    }
}
