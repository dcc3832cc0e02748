//! Markdown formatting for models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds newtype wrappers for collections and for the outcome of
//! create, update, delete and maintenance operations. Every formatter emits
//! markdown, which the CLI renders with termimad and the MCP server returns
//! verbatim.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │  Collections &  │    │   Formatted     │
//! │ (Project, Task) │───▶│  Result Types   │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: [`Projects`] and [`Tasks`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`],
//!   [`AutocloseResult`], [`ImportResult`]
//! - [`datetime`]: [`LocalDateTime`]
//! - [`models`]: Display implementations for domain models
//!
//! # Examples
//!
//! ```rust
//! use docket_core::{
//!     display::{CreateResult, UpdateResult},
//!     models::Project,
//! };
//! use jiff::Timestamp;
//!
//! let project = Project {
//!     id: 1,
//!     name: "Work".to_string(),
//!     description: Some("Day job".to_string()),
//!     created_at: Timestamp::now(),
//!     tasks: vec![],
//! };
//!
//! let created = format!("{}", CreateResult::new(project.clone()));
//! assert!(created.contains("Created project with ID: 1"));
//!
//! let updated = UpdateResult::with_changes(project, vec!["Renamed".to_string()]);
//! assert!(format!("{updated}").contains("Changes made:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Projects, Tasks};
pub use datetime::LocalDateTime;
pub use results::{AutocloseResult, CreateResult, DeleteResult, ImportResult, UpdateResult};
