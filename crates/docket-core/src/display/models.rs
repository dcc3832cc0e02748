//! Display implementations for domain models.
//!
//! Models render as markdown: a project as a level-one heading followed by its
//! metadata and tasks, a task as a level-three heading so it nests under its
//! project.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Project, Task, TaskStatus};

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        let done = self.tasks.iter().filter(|t| t.status.is_done()).count();
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Tasks: {} ({done} done)", self.tasks.len())?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks in this project.")?;
        } else {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- Project: {}", self.project_id)?;
        if let Some(deadline) = &self.deadline {
            writeln!(f, "- Deadline: {}", LocalDateTime(deadline))?;
        }
        if let Some(closed_at) = &self.closed_at {
            writeln!(f, "- Closed: {}", LocalDateTime(closed_at))?;
        }
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}
