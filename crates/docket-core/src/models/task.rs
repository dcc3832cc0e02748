//! Task model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::TaskStatus;

/// A unit of work belonging to exactly one project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Globally unique identifier for the task
    pub id: u64,

    /// ID of the owning project
    pub project_id: u64,

    /// Short title of the task
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Current status, a member of the configured status set
    pub status: TaskStatus,

    /// Optional deadline (UTC)
    pub deadline: Option<Timestamp>,

    /// When the task entered the terminal status; cleared when it leaves
    pub closed_at: Option<Timestamp>,
}

impl Task {
    /// Whether the task is open and its deadline lies before `now`.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        !self.status.is_done() && self.deadline.is_some_and(|deadline| deadline < now)
    }

    /// Moves the task to `status`, keeping `closed_at` consistent.
    ///
    /// Entering the terminal status stamps `closed_at` with `now`; leaving it
    /// clears `closed_at`. Re-applying the terminal status keeps the original
    /// stamp.
    pub fn set_status(&mut self, status: TaskStatus, now: Timestamp) {
        match (self.status.is_done(), status.is_done()) {
            (false, true) => self.closed_at = Some(now),
            (true, false) => self.closed_at = None,
            _ => {}
        }
        self.status = status;
    }
}
