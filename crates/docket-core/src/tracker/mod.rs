//! High-level tracker API for managing projects and tasks.
//!
//! [`Tracker`] is the entry point used by every interface. It owns the store
//! and the [`Config`], hands out the synchronous services and exposes async
//! presentation calls that run those services on the blocking thread pool:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │    Services     │    │      Store      │
//! │  (async, params │───▶│ (ProjectService,│───▶│ (MemoryStore,   │
//! │   structs)      │    │  TaskService)   │    │  SqliteStore)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     User Interface       Business Logic        Data Persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Tracker`] instances
//! - [`handlers`]: Presentation calls taking [`crate::params`] structures
//!
//! # Usage Examples
//!
//! ```rust
//! use docket_core::{params::{AddTask, CreateProject}, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new().build_in_memory();
//!
//! let project = tracker
//!     .create_project(&CreateProject {
//!         name: "Work".to_string(),
//!         description: Some("w".to_string()),
//!     })
//!     .await?;
//!
//! let task = tracker
//!     .add_task(&AddTask {
//!         project_id: project.id,
//!         title: "Write spec".to_string(),
//!         deadline: Some("2020-01-01".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! assert_eq!(task.status.as_str(), "todo");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::task;

use crate::{
    config::Config,
    error::{Result, TrackerError},
    service::{ProjectService, TaskService},
    store::Store,
};

pub mod builder;
pub mod handlers;


pub use builder::TrackerBuilder;

/// Main tracker interface for managing projects and tasks.
///
/// Cloning is cheap; clones share the same store.
#[derive(Debug)]
pub struct Tracker<S> {
    store: Arc<S>,
    config: Arc<Config>,
}

impl<S> Clone for Tracker<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Store> Tracker<S> {
    /// Creates a tracker over `store`.
    pub fn new(store: S, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Project service bound to this tracker's store.
    pub fn projects(&self) -> ProjectService<'_, S> {
        ProjectService::new(&self.store, &self.config)
    }

    /// Task service bound to this tracker's store.
    pub fn tasks(&self) -> TaskService<'_, S> {
        TaskService::new(&self.store, &self.config)
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: Store + 'static> Tracker<S> {
    /// Runs synchronous work against a clone of this tracker on the blocking
    /// thread pool.
    async fn run_blocking<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Tracker<S>) -> Result<T> + Send + 'static,
    {
        let tracker = self.clone();
        task::spawn_blocking(move || work(&tracker))
            .await
            .map_err(|e| TrackerError::Configuration {
                message: format!("Task join error: {e}"),
            })?
    }
}
