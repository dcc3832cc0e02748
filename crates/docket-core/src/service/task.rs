//! Task lifecycle rules: validation, status changes and the overdue sweep.

use jiff::Timestamp;
use log::{debug, info};

use crate::{
    config::Config,
    error::{Result, TrackerError},
    models::{
        parse_deadline,
        text::{optional_text, required_text, MAX_DESCRIPTION_WORDS, MAX_NAME_WORDS},
        Task, TaskStatus,
    },
    store::{NewTask, Store},
};

/// Field changes for [`TaskService::edit`]. `None` leaves a field unchanged.
///
/// An empty description or deadline clears the stored value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskChanges<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub deadline: Option<&'a str>,
    pub status: Option<&'a str>,
}

/// Adds, edits, deletes and queries tasks.
#[derive(Debug)]
pub struct TaskService<'a, S> {
    store: &'a S,
    config: &'a Config,
}

impl<'a, S: Store> TaskService<'a, S> {
    /// Creates a service over `store` governed by `config`.
    pub fn new(store: &'a S, config: &'a Config) -> Self {
        Self { store, config }
    }

    /// Adds a task to a project.
    ///
    /// The status defaults to `todo`. A task created directly in the terminal
    /// status gets `closed_at = now`.
    ///
    /// # Errors
    ///
    /// - `Validation` for an empty or over-long title or an over-long
    ///   description
    /// - `InvalidStatus` for a status outside the allowed set
    /// - `InvalidDeadline` for an unparseable deadline
    /// - `ProjectNotFound` if the project does not exist
    /// - `CapacityExceeded` if the project's task ceiling is reached
    pub fn add(
        &self,
        project_id: u64,
        title: &str,
        description: Option<&str>,
        deadline: Option<&str>,
        status: Option<&str>,
    ) -> Result<Task> {
        let title = required_text("title", title, MAX_NAME_WORDS)?;
        let description = optional_text("description", description, MAX_DESCRIPTION_WORDS)?;
        let status = match status.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => self.config.allowed_statuses.parse(raw)?,
            None => TaskStatus::todo(),
        };
        let deadline = match deadline {
            Some(raw) => parse_deadline(raw)?,
            None => None,
        };
        let closed_at = status.is_done().then(Timestamp::now);
        let max_tasks = self.config.max_tasks_per_project;

        let task = self.store.atomically(|repo| {
            if repo.get_project(project_id)?.is_none() {
                return Err(TrackerError::ProjectNotFound { id: project_id });
            }

            if repo.count_tasks(project_id)? >= max_tasks {
                return Err(TrackerError::CapacityExceeded {
                    resource: "tasks in this project",
                    limit: max_tasks,
                });
            }

            repo.insert_task(&NewTask {
                project_id,
                title: &title,
                description: description.as_deref(),
                status: &status,
                deadline,
                closed_at,
            })
        })?;

        info!("Added task {} to project {}", task.id, task.project_id);
        Ok(task)
    }

    /// Edits the supplied fields of a task.
    ///
    /// # Errors
    ///
    /// - `TaskNotFound` if the task does not exist
    /// - `Validation`, `InvalidStatus` or `InvalidDeadline` for an invalid
    ///   supplied field
    pub fn edit(&self, id: u64, changes: TaskChanges<'_>) -> Result<Task> {
        let title = changes
            .title
            .map(|raw| required_text("title", raw, MAX_NAME_WORDS))
            .transpose()?;
        let description = changes
            .description
            .map(|raw| optional_text("description", Some(raw), MAX_DESCRIPTION_WORDS))
            .transpose()?;
        let deadline = changes.deadline.map(parse_deadline).transpose()?;
        let status = changes
            .status
            .map(|raw| self.config.allowed_statuses.parse(raw))
            .transpose()?;

        let task = self.store.atomically(|repo| {
            let mut task = repo.get_task(id)?.ok_or(TrackerError::TaskNotFound { id })?;

            if let Some(title) = title {
                task.title = title;
            }
            if let Some(description) = description {
                task.description = description;
            }
            if let Some(deadline) = deadline {
                task.deadline = deadline;
            }
            if let Some(status) = status {
                task.set_status(status, Timestamp::now());
            }

            repo.update_task(&task)?;
            Ok(task)
        })?;

        info!("Updated task {}", task.id);
        Ok(task)
    }

    /// Moves a task to another status.
    ///
    /// Entering `done` sets `closed_at`, leaving it clears `closed_at`.
    ///
    /// # Errors
    ///
    /// - `InvalidStatus` if the status is not allowed
    /// - `TaskNotFound` if the task does not exist
    pub fn change_status(&self, id: u64, status: &str) -> Result<Task> {
        let status = self.config.allowed_statuses.parse(status)?;

        let task = self.store.atomically(|repo| {
            let mut task = repo.get_task(id)?.ok_or(TrackerError::TaskNotFound { id })?;
            task.set_status(status, Timestamp::now());
            repo.update_task(&task)?;
            Ok(task)
        })?;

        info!("Task {} is now '{}'", task.id, task.status.as_str());
        Ok(task)
    }

    /// Deletes a task and returns it as it was.
    ///
    /// # Errors
    ///
    /// Returns `TaskNotFound` if the task does not exist, including when it
    /// was already deleted.
    pub fn delete(&self, id: u64) -> Result<Task> {
        let task = self.store.atomically(|repo| {
            let task = repo.get_task(id)?.ok_or(TrackerError::TaskNotFound { id })?;
            repo.delete_task(id)?;
            Ok(task)
        })?;

        info!("Deleted task {} from project {}", task.id, task.project_id);
        Ok(task)
    }

    /// Retrieves a task.
    pub fn get(&self, id: u64) -> Result<Option<Task>> {
        self.store.atomically(|repo| repo.get_task(id))
    }

    /// Lists a project's tasks by ascending id.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the project does not exist.
    pub fn list_by_project(&self, project_id: u64) -> Result<Vec<Task>> {
        self.store.atomically(|repo| {
            repo.get_project(project_id)?
                .map(|project| project.tasks)
                .ok_or(TrackerError::ProjectNotFound { id: project_id })
        })
    }

    /// Open tasks whose deadline lies before `now`, by deadline then id.
    pub fn list_overdue_open(&self, now: Timestamp) -> Result<Vec<Task>> {
        let tasks = self.store.atomically(|repo| repo.list_overdue_open(now))?;
        debug!("Found {} overdue task(s)", tasks.len());
        Ok(tasks)
    }

    /// Closes every overdue open task and returns the closed tasks.
    ///
    /// All tasks are closed in a single unit of work with `closed_at = now`.
    /// Running it again with the same `now` closes nothing.
    pub fn autoclose_overdue_tasks(&self, now: Timestamp) -> Result<Vec<Task>> {
        let closed = self.store.atomically(|repo| {
            let mut overdue = repo.list_overdue_open(now)?;
            for task in &mut overdue {
                task.set_status(TaskStatus::done(), now);
                repo.update_task(task)?;
            }
            Ok(overdue)
        })?;

        info!("Autoclose closed {} overdue task(s)", closed.len());
        Ok(closed)
    }

    /// Closes every overdue open task and returns how many were closed.
    pub fn autoclose_overdue(&self, now: Timestamp) -> Result<usize> {
        self.autoclose_overdue_tasks(now).map(|closed| closed.len())
    }
}
