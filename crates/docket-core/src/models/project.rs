//! Project model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Task;

/// A named container for tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    /// Unique identifier for the project
    pub id: u64,

    /// Name of the project, unique under the configured collation
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Timestamp when the project was created (UTC)
    pub created_at: Timestamp,

    /// Tasks owned by the project, ordered by id
    #[serde(default)]
    pub tasks: Vec<Task>,
}
