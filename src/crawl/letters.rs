//! The fixed a–z letter sequence and subset selection.

use thiserror::Error;

/// Catalog sections, in crawl order.
pub const LETTERS: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// A letter selection contained something other than a–z.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid letter '{found}' in selection '{selection}': expected only a-z")]
pub struct LetterSelectionError {
    /// The full selection string.
    pub selection: String,
    /// The offending character.
    pub found: char,
}

/// Parses a letter selection such as `"abc"` or `"x,y,z"`.
///
/// Case is ignored, commas and whitespace are separators, duplicates collapse,
/// and the result is always in a–z order regardless of input order.
///
/// # Errors
///
/// Returns [`LetterSelectionError`] for any character outside a–z.
///
/// # Examples
///
/// ```
/// use crawler_core::parse_letters;
///
/// assert_eq!(parse_letters("zA, m").unwrap(), vec!['a', 'm', 'z']);
/// assert!(parse_letters("a1").is_err());
/// ```
pub fn parse_letters(selection: &str) -> Result<Vec<char>, LetterSelectionError> {
    let mut wanted = [false; 26];
    for ch in selection.chars() {
        if ch == ',' || ch.is_whitespace() {
            continue;
        }
        let lower = ch.to_ascii_lowercase();
        if !lower.is_ascii_lowercase() {
            return Err(LetterSelectionError {
                selection: selection.to_string(),
                found: ch,
            });
        }
        wanted[lower as usize - 'a' as usize] = true;
    }

    Ok(LETTERS
        .iter()
        .zip(wanted)
        .filter_map(|(&letter, keep)| keep.then_some(letter))
        .collect())
}
