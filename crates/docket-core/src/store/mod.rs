//! Storage abstraction for projects and tasks.
//!
//! Services never talk to a backend directly. They run each operation as one
//! unit of work through [`Store::atomically`], which hands the closure a
//! [`Repository`] scoped to a transaction:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Services     │    │      Store      │    │   Repository    │
//! │ (project, task) │───▶│  atomically()   │───▶│ (memory/sqlite) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Two interchangeable backends are provided and selected at composition time
//! by [`crate::TrackerBuilder`]:
//!
//! - [`MemoryStore`]: mutex-guarded maps with a secondary name index
//! - [`SqliteStore`]: one SQLite connection and transaction per unit of work
//!
//! When the closure returns `Err` nothing it wrote is kept.

use jiff::Timestamp;

use crate::{
    error::Result,
    models::{Project, Task, TaskStatus},
};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// A project about to be inserted; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewProject<'a> {
    pub name: &'a str,
    pub name_key: &'a str,
    pub description: Option<&'a str>,
    pub created_at: Timestamp,
}

/// A task about to be inserted; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewTask<'a> {
    pub project_id: u64,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a TaskStatus,
    pub deadline: Option<Timestamp>,
    pub closed_at: Option<Timestamp>,
}

/// CRUD capability set over one unit of work.
///
/// Projects returned by `get_project`, `find_project_by_name_key` and
/// `list_projects` have their tasks loaded.
pub trait Repository {
    /// Inserts a project and returns it with its generated id.
    fn insert_project(&mut self, project: &NewProject<'_>) -> Result<Project>;

    /// Inserts a project keeping its id and timestamps (snapshot import).
    fn restore_project(&mut self, project: &Project, name_key: &str) -> Result<()>;

    /// Retrieves a project by id.
    fn get_project(&self, id: u64) -> Result<Option<Project>>;

    /// Retrieves a project by its normalized name key.
    fn find_project_by_name_key(&self, name_key: &str) -> Result<Option<Project>>;

    /// Lists all projects by ascending id.
    fn list_projects(&self) -> Result<Vec<Project>>;

    /// Number of stored projects.
    fn count_projects(&self) -> Result<u64>;

    /// Highest project and task ids ever assigned, including deleted ones.
    fn last_assigned_ids(&self) -> Result<(u64, u64)>;

    /// Persists name and description of an existing project.
    fn update_project(&mut self, project: &Project, name_key: &str) -> Result<()>;

    /// Deletes a project and all its tasks. Returns false if it did not exist.
    fn delete_project(&mut self, id: u64) -> Result<bool>;

    /// Inserts a task and returns it with its generated id.
    fn insert_task(&mut self, task: &NewTask<'_>) -> Result<Task>;

    /// Inserts a task keeping its id (snapshot import).
    fn restore_task(&mut self, task: &Task) -> Result<()>;

    /// Retrieves a task by id.
    fn get_task(&self, id: u64) -> Result<Option<Task>>;

    /// Lists the tasks of a project by ascending id.
    fn list_tasks(&self, project_id: u64) -> Result<Vec<Task>>;

    /// Number of tasks in a project.
    fn count_tasks(&self, project_id: u64) -> Result<u64>;

    /// Persists every mutable field of an existing task.
    fn update_task(&mut self, task: &Task) -> Result<()>;

    /// Deletes a task. Returns false if it did not exist.
    fn delete_task(&mut self, id: u64) -> Result<bool>;

    /// Tasks with `deadline < now` whose status is not terminal, ordered by
    /// deadline then id.
    fn list_overdue_open(&self, now: Timestamp) -> Result<Vec<Task>>;
}

/// A backing store able to run atomic units of work.
pub trait Store: Send + Sync {
    /// Runs `work` against a transactional repository.
    ///
    /// Changes are committed when `work` returns `Ok` and discarded otherwise.
    fn atomically<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Repository) -> Result<T>;
}

/// Sorts overdue candidates the way every backend reports them.
pub(crate) fn sort_overdue(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| a.deadline.cmp(&b.deadline).then(a.id.cmp(&b.id)));
}
