//! Timestamp rendering in the local time zone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Renders a UTC timestamp in the system time zone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
///
/// ```rust
/// use docket_core::display::LocalDateTime;
/// use jiff::Timestamp;
///
/// let ts: Timestamp = "2020-01-01T00:00:00Z".parse().unwrap();
/// println!("Due {}", LocalDateTime(&ts));
/// ```
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zoned = self.0.to_zoned(TimeZone::system());
        write!(f, "{}", zoned.strftime("%Y-%m-%d %H:%M:%S %Z"))
    }
}
