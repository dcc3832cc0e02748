//! Task CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::{optional_timestamp_at, SqliteRepository};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Task, TaskStatus, DONE_STATUS},
    store::{sort_overdue, NewTask},
};

const TASK_COLUMNS: &str = "id, project_id, title, description, status, deadline, closed_at";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (project_id, title, description, status, deadline, closed_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const RESTORE_TASK_SQL: &str = "INSERT INTO tasks (id, project_id, title, description, status, deadline, closed_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const CHECK_PROJECT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1)";
const COUNT_TASKS_SQL: &str = "SELECT COUNT(*) FROM tasks WHERE project_id = ?1";
const UPDATE_TASK_SQL: &str = "UPDATE tasks SET title = ?1, description = ?2, status = ?3, deadline = ?4, closed_at = ?5 WHERE id = ?6";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1";

impl SqliteRepository<'_> {
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get::<_, i64>(0)? as u64,
            project_id: row.get::<_, i64>(1)? as u64,
            title: row.get(2)?,
            description: row.get(3)?,
            status: TaskStatus::normalized(&row.get::<_, String>(4)?),
            deadline: optional_timestamp_at(row, 5)?,
            closed_at: optional_timestamp_at(row, 6)?,
        })
    }

    fn query_tasks(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql).db_context("Failed to prepare query")?;

        let tasks = stmt
            .query_map(params, Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks");
        tasks
    }

    fn project_exists(&self, project_id: u64) -> Result<bool> {
        self.conn
            .query_row(CHECK_PROJECT_EXISTS_SQL, params![project_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check project existence")
    }

    pub(crate) fn insert_task_row(&self, new: &NewTask<'_>) -> Result<Task> {
        if !self.project_exists(new.project_id)? {
            return Err(TrackerError::ProjectNotFound { id: new.project_id });
        }

        self.conn
            .execute(
                INSERT_TASK_SQL,
                params![
                    new.project_id as i64,
                    new.title,
                    new.description,
                    new.status.as_str(),
                    new.deadline.map(|d| d.to_string()),
                    new.closed_at.map(|c| c.to_string())
                ],
            )
            .db_context("Failed to insert task")?;

        Ok(Task {
            id: self.conn.last_insert_rowid() as u64,
            project_id: new.project_id,
            title: new.title.to_string(),
            description: new.description.map(String::from),
            status: new.status.clone(),
            deadline: new.deadline,
            closed_at: new.closed_at,
        })
    }

    pub(crate) fn restore_task_row(&self, task: &Task) -> Result<()> {
        if !self.project_exists(task.project_id)? {
            return Err(TrackerError::ProjectNotFound {
                id: task.project_id,
            });
        }

        self.conn
            .execute(
                RESTORE_TASK_SQL,
                params![
                    task.id as i64,
                    task.project_id as i64,
                    task.title,
                    task.description,
                    task.status.as_str(),
                    task.deadline.map(|d| d.to_string()),
                    task.closed_at.map(|c| c.to_string())
                ],
            )
            .db_context("Failed to restore task")?;
        Ok(())
    }

    pub(crate) fn select_task(&self, id: u64) -> Result<Option<Task>> {
        self.conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id as i64],
                Self::build_task_from_row,
            )
            .optional()
            .db_context("Failed to query task")
    }

    pub(crate) fn select_tasks(&self, project_id: u64) -> Result<Vec<Task>> {
        self.query_tasks(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = ?1 ORDER BY id"),
            params![project_id as i64],
        )
    }

    pub(crate) fn count_task_rows(&self, project_id: u64) -> Result<u64> {
        self.conn
            .query_row(COUNT_TASKS_SQL, params![project_id as i64], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count as u64)
            .db_context("Failed to count tasks")
    }

    pub(crate) fn update_task_row(&self, task: &Task) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                UPDATE_TASK_SQL,
                params![
                    task.title,
                    task.description,
                    task.status.as_str(),
                    task.deadline.map(|d| d.to_string()),
                    task.closed_at.map(|c| c.to_string()),
                    task.id as i64
                ],
            )
            .db_context("Failed to update task")?;

        if rows_affected == 0 {
            return Err(TrackerError::TaskNotFound { id: task.id });
        }
        Ok(())
    }

    pub(crate) fn delete_task_row(&self, id: u64) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute(DELETE_TASK_SQL, params![id as i64])
            .db_context("Failed to delete task")?;
        Ok(rows_affected > 0)
    }

    pub(crate) fn select_overdue_open(&self, now: Timestamp) -> Result<Vec<Task>> {
        // Fractional seconds break lexicographic order of the stored text, so
        // the deadline comparison happens after parsing
        let candidates = self.query_tasks(
            &format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE deadline IS NOT NULL AND status != ?1"
            ),
            params![DONE_STATUS],
        )?;

        let mut overdue: Vec<Task> = candidates
            .into_iter()
            .filter(|task| task.is_overdue(now))
            .collect();
        sort_overdue(&mut overdue);
        Ok(overdue)
    }
}
