//! Collection wrappers for displaying groups of projects or tasks.

use std::{fmt, ops::Index};

use crate::models::{Project, Task};

/// Implements the read-only collection API and `Display` for a newtype over
/// `Vec<$item>`.
macro_rules! collection_wrapper {
    ($name:ident, $item:ty, $empty:literal) => {
        impl $name {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Number of items in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Item at `index`, if any.
            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            /// Iterator over the items.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    return writeln!(f, $empty);
                }
                for item in &self.0 {
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    };
}

/// Projects shown as a list, each with its tasks.
///
/// # Examples
///
/// ```rust
/// use docket_core::display::Projects;
///
/// assert_eq!(Projects(vec![]).to_string(), "No projects found.\n");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Projects(pub Vec<Project>);

/// Tasks shown as a flat list.
#[derive(Debug, Clone, PartialEq)]
pub struct Tasks(pub Vec<Task>);

collection_wrapper!(Projects, Project, "No projects found.");
collection_wrapper!(Tasks, Task, "No tasks found.");

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::TaskStatus;

    fn create_test_task(id: u64) -> Task {
        Task {
            id,
            project_id: 1,
            title: format!("Task {id}"),
            description: None,
            status: TaskStatus::todo(),
            deadline: None,
            closed_at: None,
        }
    }

    #[test]
    fn test_tasks_display() {
        let tasks = Tasks(vec![create_test_task(1), create_test_task(2)]);
        let output = tasks.to_string();
        assert!(output.contains("### 1. Task 1 (○ todo)"));
        assert!(output.contains("### 2. Task 2"));
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].id, 2);
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(Tasks(vec![]).to_string(), "No tasks found.\n");
        assert!(Projects(vec![]).is_empty());
    }

    #[test]
    fn test_projects_display_lists_each_project() {
        let project = |id: u64, name: &str| Project {
            id,
            name: name.to_string(),
            description: None,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            tasks: vec![],
        };
        let output = Projects(vec![project(1, "Work"), project(2, "Home")]).to_string();
        assert!(output.contains("# 1. Work"));
        assert!(output.contains("# 2. Home"));
    }
}
