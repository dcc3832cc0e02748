//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Project, Task};

/// Outcome of a create operation: a confirmation line followed by the
/// created resource.
///
/// # Examples
///
/// ```rust
/// use docket_core::{display::CreateResult, models::{Task, TaskStatus}};
///
/// let task = Task {
///     id: 4,
///     project_id: 1,
///     title: "Write spec".to_string(),
///     description: None,
///     status: TaskStatus::todo(),
///     deadline: None,
///     closed_at: None,
/// };
/// let output = CreateResult::new(task).to_string();
/// assert!(output.starts_with("Created task with ID: 4"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

/// Outcome of an update operation, optionally listing what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

/// Outcome of a delete operation.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

/// A displayable entity with an id, named in confirmation lines.
pub trait Resource: fmt::Display {
    /// Noun used in confirmation lines
    const KIND: &'static str;

    /// Identifier shown in confirmation lines.
    fn id(&self) -> u64;
}

impl Resource for Project {
    const KIND: &'static str = "project";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Task {
    const KIND: &'static str = "task";

    fn id(&self) -> u64 {
        self.id
    }
}

impl<T: Resource> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} with ID: {}", T::KIND, self.resource.id())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl<T: Resource> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {} with ID: {}", T::KIND, self.resource.id())?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for DeleteResult<Project> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted project '{}' (ID: {}) and {} task(s)",
            self.resource.name,
            self.resource.id,
            self.resource.tasks.len()
        )
    }
}

impl fmt::Display for DeleteResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted task '{}' (ID: {}) from project {}",
            self.resource.title, self.resource.id, self.resource.project_id
        )
    }
}

/// Outcome of the overdue sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct AutocloseResult {
    /// Tasks that were closed, or would be closed in a dry run
    pub tasks: Vec<Task>,
    pub dry_run: bool,
}

impl AutocloseResult {
    /// Create a new AutocloseResult.
    pub fn new(tasks: Vec<Task>, dry_run: bool) -> Self {
        Self { tasks, dry_run }
    }
}

impl fmt::Display for AutocloseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.tasks.is_empty(), self.dry_run) {
            (true, _) => return writeln!(f, "No overdue tasks."),
            (false, true) => writeln!(f, "Would close {} overdue task(s):", self.tasks.len())?,
            (false, false) => writeln!(f, "Closed {} overdue task(s):", self.tasks.len())?,
        }

        writeln!(f)?;
        for task in &self.tasks {
            writeln!(
                f,
                "- {}. {} (project {})",
                task.id, task.title, task.project_id
            )?;
        }
        Ok(())
    }
}

/// Outcome of a snapshot import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportResult {
    pub projects: usize,
    pub tasks: usize,
}

impl fmt::Display for ImportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Imported {} project(s) and {} task(s)",
            self.projects, self.tasks
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::TaskStatus;

    fn create_test_project() -> Project {
        Project {
            id: 2,
            name: "Work".to_string(),
            description: None,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            tasks: vec![],
        }
    }

    fn create_test_task() -> Task {
        Task {
            id: 9,
            project_id: 2,
            title: "Write spec".to_string(),
            description: None,
            status: TaskStatus::done(),
            deadline: None,
            closed_at: None,
        }
    }

    #[test]
    fn test_create_result_display() {
        let output = CreateResult::new(create_test_project()).to_string();
        assert!(output.starts_with("Created project with ID: 2\n\n# 2. Work"));
    }

    #[test]
    fn test_update_result_lists_changes() {
        let result = UpdateResult::with_changes(
            create_test_task(),
            vec!["Status set to done".to_string()],
        );
        let output = result.to_string();
        assert!(output.contains("Updated task with ID: 9"));
        assert!(output.contains("- Status set to done"));

        let plain = UpdateResult::new(create_test_task()).to_string();
        assert!(!plain.contains("Changes made:"));
    }

    #[test]
    fn test_delete_result_display() {
        let output = DeleteResult::new(create_test_task()).to_string();
        assert_eq!(output, "Deleted task 'Write spec' (ID: 9) from project 2\n");
    }

    #[test]
    fn test_autoclose_result_display() {
        assert_eq!(
            AutocloseResult::new(vec![], false).to_string(),
            "No overdue tasks.\n"
        );

        let closed = AutocloseResult::new(vec![create_test_task()], false).to_string();
        assert!(closed.starts_with("Closed 1 overdue task(s):"));
        assert!(closed.contains("- 9. Write spec (project 2)"));

        let preview = AutocloseResult::new(vec![create_test_task()], true).to_string();
        assert!(preview.starts_with("Would close 1 overdue task(s):"));
    }
}
