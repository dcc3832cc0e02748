//! Data models for projects and tasks.
//!
//! This module contains the core domain models of the tracker along with the
//! value types and rules attached to them:
//!
//! - [`Project`] and [`Task`]: the two persisted entities
//! - [`TaskStatus`] and [`StatusSet`]: the configured status vocabulary
//! - [`parse_deadline`]: accepted deadline formats
//! - [`text`]: word limits for names, titles and descriptions
//!
//! Display implementations for these models are located in
//! [`crate::display::models`] to keep presentation separate from the data
//! structures.
//!
//! # Examples
//!
//! ```rust
//! use docket_core::models::{Task, TaskStatus};
//! use jiff::Timestamp;
//!
//! let mut task = Task {
//!     id: 1,
//!     project_id: 1,
//!     title: "Write spec".to_string(),
//!     description: None,
//!     status: TaskStatus::todo(),
//!     deadline: None,
//!     closed_at: None,
//! };
//!
//! let now = Timestamp::now();
//! task.set_status(TaskStatus::done(), now);
//! assert_eq!(task.closed_at, Some(now));
//!
//! task.set_status(TaskStatus::todo(), now);
//! assert_eq!(task.closed_at, None);
//! ```

pub mod deadline;
pub mod project;
pub mod status;
pub mod task;
pub mod text;

#[cfg(test)]
mod tests;

pub use deadline::parse_deadline;
pub use project::Project;
pub use status::{StatusSet, TaskStatus, DEFAULT_STATUS, DONE_STATUS};
pub use task::Task;
