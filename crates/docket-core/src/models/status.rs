//! Task status values and the configured status vocabulary.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Status given to new tasks when none is supplied.
pub const DEFAULT_STATUS: &str = "todo";

/// Terminal status; entering it sets `closed_at`.
pub const DONE_STATUS: &str = "done";

/// A normalized (trimmed, lowercase) task status.
///
/// Membership in the allowed set is checked by [`StatusSet::parse`]; values
/// read back from storage are trusted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStatus(String);

impl TaskStatus {
    /// Normalizes raw input without checking membership.
    pub fn normalized(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// The default status for new tasks.
    pub fn todo() -> Self {
        Self(DEFAULT_STATUS.to_string())
    }

    /// The terminal status.
    pub fn done() -> Self {
        Self(DONE_STATUS.to_string())
    }

    /// Whether this is the terminal status.
    pub fn is_done(&self) -> bool {
        self.0 == DONE_STATUS
    }

    /// Database/string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use docket_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::done().with_icon(), "✓ done");
    /// assert_eq!(TaskStatus::todo().with_icon(), "○ todo");
    /// assert_eq!(TaskStatus::normalized("Doing").with_icon(), "➤ doing");
    /// ```
    pub fn with_icon(&self) -> String {
        let icon = match self.0.as_str() {
            DONE_STATUS => '✓',
            DEFAULT_STATUS => '○',
            _ => '➤',
        };
        format!("{icon} {}", self.0)
    }
}

/// Ordered, de-duplicated set of allowed task statuses.
///
/// Always contains [`DEFAULT_STATUS`] and [`DONE_STATUS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSet {
    statuses: Vec<TaskStatus>,
}

impl StatusSet {
    /// Builds a status set from raw values.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Configuration` if the set lacks `todo` or `done`.
    pub fn new<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut statuses: Vec<TaskStatus> = Vec::new();
        for value in values {
            let status = TaskStatus::normalized(value.as_ref());
            if !status.0.is_empty() && !statuses.contains(&status) {
                statuses.push(status);
            }
        }

        for required in [DEFAULT_STATUS, DONE_STATUS] {
            if !statuses.iter().any(|s| s.as_str() == required) {
                return Err(TrackerError::configuration(format!(
                    "allowed statuses must include '{required}'"
                )));
            }
        }

        Ok(Self { statuses })
    }

    /// Validates and normalizes a raw status.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidStatus` if the value is not in the set.
    pub fn parse(&self, raw: &str) -> Result<TaskStatus> {
        let status = TaskStatus::normalized(raw);
        if self.contains(&status) {
            Ok(status)
        } else {
            Err(TrackerError::InvalidStatus {
                status: raw.trim().to_string(),
                allowed: self.to_string(),
            })
        }
    }

    /// Whether the status is a member of the set.
    pub fn contains(&self, status: &TaskStatus) -> bool {
        self.statuses.contains(status)
    }

    /// Iterates the statuses in configured order.
    pub fn iter(&self) -> std::slice::Iter<'_, TaskStatus> {
        self.statuses.iter()
    }
}

impl Default for StatusSet {
    fn default() -> Self {
        Self {
            statuses: ["todo", "doing", "done"]
                .into_iter()
                .map(TaskStatus::normalized)
                .collect(),
        }
    }
}

impl FromStr for StatusSet {
    type Err = TrackerError;

    /// Parses a comma-separated list such as `todo,doing,done,blocked`.
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.split(','))
    }
}

impl fmt::Display for StatusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.statuses.iter().map(TaskStatus::as_str).collect();
        write!(f, "{}", names.join(", "))
    }
}
