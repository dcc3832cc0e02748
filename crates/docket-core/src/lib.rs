//! Core library for the Docket project and task tracker.
//!
//! This crate provides the domain model, validation and lifecycle rules for
//! projects and tasks, a pluggable persistence layer (in-memory or SQLite) and
//! markdown display types shared by the CLI and the MCP server.
//!
//! # Layers
//!
//! - **Models** ([`models`]): [`Project`], [`Task`], statuses, deadlines and
//!   word limits
//! - **Storage** ([`store`], [`db`]): the [`Store`]/[`Repository`] seam and
//!   its two backends
//! - **Services** ([`service`]): [`ProjectService`] and [`TaskService`], one
//!   unit of work per operation
//! - **Facade** ([`tracker`]): [`Tracker`] with async presentation calls
//!   taking [`params`] structures
//! - **Display** ([`display`]): markdown rendering of models and results
//!
//! # Quick Start
//!
//! ```rust
//! use docket_core::{Config, TrackerBuilder};
//! use jiff::Timestamp;
//!
//! let tracker = TrackerBuilder::new()
//!     .with_config(Config::default().with_max_projects(10))
//!     .build_in_memory();
//!
//! let project = tracker.projects().create("Work", Some("w")).unwrap();
//! let task = tracker
//!     .tasks()
//!     .add(project.id, "Write spec", None, Some("2020-01-01"), None)
//!     .unwrap();
//!
//! let now: Timestamp = "2025-01-01T00:00:00Z".parse().unwrap();
//! assert_eq!(tracker.tasks().autoclose_overdue(now).unwrap(), 1);
//!
//! let task = tracker.tasks().get(task.id).unwrap().unwrap();
//! assert!(task.status.is_done());
//! assert_eq!(task.closed_at, Some(now));
//! ```

pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod service;
pub mod snapshot;
pub mod store;
pub mod tracker;

// Re-export commonly used types
pub use config::{Config, NameCollation};
pub use display::{
    AutocloseResult, CreateResult, DeleteResult, ImportResult, LocalDateTime, Projects, Tasks,
    UpdateResult,
};
pub use error::{ErrorKind, Result, TrackerError};
pub use models::{Project, StatusSet, Task, TaskStatus};
pub use service::{ProjectService, TaskChanges, TaskService};
pub use snapshot::Snapshot;
pub use store::{MemoryStore, Repository, SqliteStore, Store};
pub use tracker::{Tracker, TrackerBuilder};
