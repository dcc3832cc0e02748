//! Deadline parsing.

use jiff::{
    civil::{Date, DateTime, Time},
    tz::TimeZone,
    Timestamp,
};

use crate::error::{Result, TrackerError};

/// Parses a user-supplied deadline.
///
/// Accepted forms:
/// - `YYYY-MM-DD`, taken as midnight UTC
/// - `YYYY-MM-DDTHH:MM[:SS]` without offset, taken as UTC
/// - RFC 3339 / ISO-8601 with offset, e.g. `2025-12-01T09:00:00+02:00`
///
/// Empty or whitespace-only input yields `None`.
///
/// # Errors
///
/// Returns `TrackerError::InvalidDeadline` for anything else.
///
/// # Examples
///
/// ```rust
/// use docket_core::models::parse_deadline;
///
/// let deadline = parse_deadline("2020-01-01").unwrap().unwrap();
/// assert_eq!(deadline.to_string(), "2020-01-01T00:00:00Z");
/// assert!(parse_deadline("  ").unwrap().is_none());
/// assert!(parse_deadline("01/02/2020").is_err());
/// ```
pub fn parse_deadline(input: &str) -> Result<Option<Timestamp>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let invalid = || TrackerError::InvalidDeadline {
        input: trimmed.to_string(),
    };

    if let Ok(ts) = trimmed.parse::<Timestamp>() {
        return Ok(Some(ts));
    }

    let civil = if trimmed.len() == 10 {
        trimmed
            .parse::<Date>()
            .map_err(|_| invalid())?
            .to_datetime(Time::midnight())
    } else {
        trimmed.parse::<DateTime>().map_err(|_| invalid())?
    };

    civil
        .to_zoned(TimeZone::UTC)
        .map(|zoned| Some(zoned.timestamp()))
        .map_err(|_| invalid())
}
