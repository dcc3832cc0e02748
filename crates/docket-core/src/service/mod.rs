//! Business rules for projects and tasks.
//!
//! Services validate input shape first, then run every check that depends on
//! stored state together with the write inside one [`Store::atomically`] unit
//! of work, so a failed operation never leaves a partial write behind.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ Tracker facade  │    │    Services     │    │      Store      │
//! │   (handlers)    │───▶│ (project, task) │───▶│  (memory/sqlite)│
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!   Presentation API       Validation/rules       Data Persistence
//! ```
//!
//! Both services borrow the store and the [`Config`] and are cheap to create;
//! [`crate::Tracker`] hands them out per call.
//!
//! [`Store::atomically`]: crate::store::Store::atomically
//! [`Config`]: crate::Config

pub mod project;
pub mod task;

pub use project::ProjectService;
pub use task::{TaskChanges, TaskService};
