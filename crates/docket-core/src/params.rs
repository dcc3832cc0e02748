//! Parameter structures for tracker operations.
//!
//! These structures are shared by every interface (CLI, MCP) and carry no
//! framework-specific derives beyond serde. Interface layers wrap them in
//! their own types (clap `Args`, MCP request structs) and convert with
//! `.into()`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! With the `schema` feature enabled the structures also derive
//! `schemars::JsonSchema` so the MCP server can publish tool schemas.
//!
//! Text fields hold raw user input. Trimming, word limits, status
//! normalization and deadline parsing happen in the services.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Generic parameters for operations requiring just an ID.
///
/// Used for show/delete of projects and tasks and for listing a project's
/// tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateProject {
    /// Project name, at most 30 words, unique
    pub name: String,
    /// Optional description, at most 150 words
    pub description: Option<String>,
}

/// Parameters for editing an existing project.
///
/// Omitted fields are left unchanged; an empty description clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EditProject {
    /// ID of the project to edit
    pub id: u64,
    /// New project name
    pub name: Option<String>,
    /// New description; empty string clears it
    pub description: Option<String>,
}

/// Parameters for adding a task to a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddTask {
    /// ID of the owning project
    pub project_id: u64,
    /// Task title, at most 30 words
    pub title: String,
    /// Optional description, at most 150 words
    pub description: Option<String>,
    /// Optional deadline: YYYY-MM-DD or an ISO-8601 timestamp
    pub deadline: Option<String>,
    /// Optional initial status (defaults to "todo")
    pub status: Option<String>,
}

/// Parameters for editing an existing task.
///
/// Omitted fields are left unchanged; an empty description or deadline
/// clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EditTask {
    /// ID of the task to edit
    pub id: u64,
    /// New title
    pub title: Option<String>,
    /// New description; empty string clears it
    pub description: Option<String>,
    /// New deadline; empty string clears it
    pub deadline: Option<String>,
    /// New status
    pub status: Option<String>,
}

/// Parameters for changing a task's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ChangeStatus {
    /// ID of the task
    pub id: u64,
    /// New status, case-insensitive
    pub status: String,
}

/// Parameters for the overdue sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Autoclose {
    /// Only report the tasks that would be closed
    #[serde(default)]
    pub dry_run: bool,
}

/// Parameters for loading a snapshot into an empty store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ImportSnapshot {
    /// Snapshot JSON as produced by an export
    pub snapshot: String,
}
