//! Word-limit validation for names, titles and descriptions.

use crate::error::{Result, TrackerError};

/// Maximum number of words in a project name or task title.
pub const MAX_NAME_WORDS: usize = 30;

/// Maximum number of words in a description.
pub const MAX_DESCRIPTION_WORDS: usize = 150;

/// Counts whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Trims a required field and checks it is non-empty and within `max_words`.
///
/// # Errors
///
/// Returns `TrackerError::Validation` naming `field` on failure.
pub fn required_text(field: &str, raw: &str, max_words: usize) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::validation(field).with_reason("must not be empty"));
    }
    check_words(field, trimmed, max_words)?;
    Ok(trimmed.to_string())
}

/// Trims an optional field; empty input becomes `None`.
///
/// # Errors
///
/// Returns `TrackerError::Validation` naming `field` when over `max_words`.
pub fn optional_text(field: &str, raw: Option<&str>, max_words: usize) -> Result<Option<String>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            check_words(field, trimmed, max_words)?;
            Ok(Some(trimmed.to_string()))
        }
    }
}

fn check_words(field: &str, text: &str, max_words: usize) -> Result<()> {
    let words = word_count(text);
    if words > max_words {
        return Err(TrackerError::validation(field)
            .with_reason(format!("must be <= {max_words} words (got {words})")));
    }
    Ok(())
}
