//! Filename sanitization and temp-path derivation for downloads.

use std::path::{Path, PathBuf};

/// Characters that are unsafe in a filename on at least one common filesystem.
const FORBIDDEN_CHARS: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Suffix of the in-flight file a download streams into before the rename.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Turns a display name into a single safe path segment.
///
/// Surrounding whitespace is trimmed and each forbidden character becomes a
/// hyphen. Returns `None` when nothing usable is left (empty, `.` or `..`),
/// and for names ending in [`PARTIAL_SUFFIX`] (any case), which would be
/// mistaken for a leftover in-flight file.
///
/// # Examples
///
/// ```
/// use crawler_core::sanitize_filename;
///
/// assert_eq!(sanitize_filename(" Mario <Hack>.nes ").as_deref(), Some("Mario -Hack-.nes"));
/// assert_eq!(sanitize_filename("  "), None);
/// ```
#[must_use]
pub fn sanitize_filename(display_name: &str) -> Option<String> {
    let sanitized: String = display_name
        .trim()
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '-' } else { c })
        .collect();

    match sanitized.as_str() {
        "" | "." | ".." => None,
        name if is_partial_name(name) => None,
        _ => Some(sanitized),
    }
}

fn is_partial_name(name: &str) -> bool {
    name.len() >= PARTIAL_SUFFIX.len()
        && name
            .get(name.len() - PARTIAL_SUFFIX.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(PARTIAL_SUFFIX))
}

/// Path of the partial file for `final_path` (`game.nes` -> `game.nes.part`).
#[must_use]
pub fn partial_path(final_path: &Path) -> PathBuf {
    let mut raw = final_path.as_os_str().to_owned();
    raw.push(PARTIAL_SUFFIX);
    PathBuf::from(raw)
}
