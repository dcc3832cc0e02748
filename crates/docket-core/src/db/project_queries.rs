//! Project CRUD operations and queries.

use std::collections::HashMap;

use log::info;
use rusqlite::{params, OptionalExtension};

use super::{timestamp_at, SqliteRepository};
use crate::{
    config::NameCollation,
    error::{DatabaseResultExt, Result, TrackerError},
    models::Project,
    store::NewProject,
};

const INSERT_PROJECT_SQL: &str =
    "INSERT INTO projects (name, name_key, description, created_at) VALUES (?1, ?2, ?3, ?4)";
const RESTORE_PROJECT_SQL: &str = "INSERT INTO projects (id, name, name_key, description, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_PROJECT_SQL: &str =
    "SELECT id, name, description, created_at FROM projects WHERE id = ?1";
const SELECT_PROJECT_BY_KEY_SQL: &str =
    "SELECT id, name, description, created_at FROM projects WHERE name_key = ?1";
const SELECT_PROJECTS_SQL: &str =
    "SELECT id, name, description, created_at FROM projects ORDER BY id";
const COUNT_PROJECTS_SQL: &str = "SELECT COUNT(*) FROM projects";
const UPDATE_PROJECT_SQL: &str =
    "UPDATE projects SET name = ?1, name_key = ?2, description = ?3 WHERE id = ?4";
const SELECT_NAME_KEYS_SQL: &str = "SELECT id, name, name_key FROM projects ORDER BY id";
const UPDATE_NAME_KEY_SQL: &str = "UPDATE projects SET name_key = ?1 WHERE id = ?2";
const DELETE_PROJECT_TASKS_SQL: &str = "DELETE FROM tasks WHERE project_id = ?1";
const DELETE_PROJECT_SQL: &str = "DELETE FROM projects WHERE id = ?1";

impl SqliteRepository<'_> {
    fn build_project_from_row(row: &rusqlite::Row) -> rusqlite::Result<Project> {
        Ok(Project {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            description: row.get(2)?,
            created_at: timestamp_at(row, 3)?,
            tasks: Vec::new(),
        })
    }

    /// Maps a UNIQUE violation on `name_key` to [`TrackerError::DuplicateName`].
    fn name_conflict(err: TrackerError, name: &str) -> TrackerError {
        if err.is_unique_violation() {
            TrackerError::DuplicateName {
                name: name.to_string(),
            }
        } else {
            err
        }
    }

    fn load_tasks(&self, project: Option<Project>) -> Result<Option<Project>> {
        match project {
            Some(mut project) => {
                project.tasks = self.select_tasks(project.id)?;
                Ok(Some(project))
            }
            None => Ok(None),
        }
    }

    pub(crate) fn insert_project_row(&self, new: &NewProject<'_>) -> Result<Project> {
        self.conn
            .execute(
                INSERT_PROJECT_SQL,
                params![
                    new.name,
                    new.name_key,
                    new.description,
                    new.created_at.to_string()
                ],
            )
            .db_context("Failed to insert project")
            .map_err(|e| Self::name_conflict(e, new.name))?;

        Ok(Project {
            id: self.conn.last_insert_rowid() as u64,
            name: new.name.to_string(),
            description: new.description.map(String::from),
            created_at: new.created_at,
            tasks: Vec::new(),
        })
    }

    pub(crate) fn restore_project_row(&self, project: &Project, name_key: &str) -> Result<()> {
        self.conn
            .execute(
                RESTORE_PROJECT_SQL,
                params![
                    project.id as i64,
                    project.name,
                    name_key,
                    project.description,
                    project.created_at.to_string()
                ],
            )
            .db_context("Failed to restore project")
            .map_err(|e| Self::name_conflict(e, &project.name))?;
        Ok(())
    }

    pub(crate) fn select_project(&self, id: u64) -> Result<Option<Project>> {
        let project = self
            .conn
            .query_row(
                SELECT_PROJECT_SQL,
                params![id as i64],
                Self::build_project_from_row,
            )
            .optional()
            .db_context("Failed to query project")?;

        self.load_tasks(project)
    }

    pub(crate) fn select_project_by_key(&self, name_key: &str) -> Result<Option<Project>> {
        let project = self
            .conn
            .query_row(
                SELECT_PROJECT_BY_KEY_SQL,
                params![name_key],
                Self::build_project_from_row,
            )
            .optional()
            .db_context("Failed to query project by name")?;

        self.load_tasks(project)
    }

    pub(crate) fn select_projects(&self) -> Result<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(SELECT_PROJECTS_SQL)
            .db_context("Failed to prepare query")?;

        let mut projects = stmt
            .query_map([], Self::build_project_from_row)
            .db_context("Failed to query projects")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch projects")?;

        for project in &mut projects {
            project.tasks = self.select_tasks(project.id)?;
        }

        Ok(projects)
    }

    pub(crate) fn count_project_rows(&self) -> Result<u64> {
        self.conn
            .query_row(COUNT_PROJECTS_SQL, [], |row| row.get::<_, i64>(0))
            .map(|count| count as u64)
            .db_context("Failed to count projects")
    }

    pub(crate) fn update_project_row(&self, project: &Project, name_key: &str) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                UPDATE_PROJECT_SQL,
                params![
                    project.name,
                    name_key,
                    project.description,
                    project.id as i64
                ],
            )
            .db_context("Failed to update project")
            .map_err(|e| Self::name_conflict(e, &project.name))?;

        if rows_affected == 0 {
            return Err(TrackerError::ProjectNotFound { id: project.id });
        }
        Ok(())
    }

    pub(crate) fn delete_project_row(&self, id: u64) -> Result<bool> {
        // The foreign key cascades as well; deleting explicitly keeps databases
        // opened without the pragma consistent
        self.conn
            .execute(DELETE_PROJECT_TASKS_SQL, params![id as i64])
            .db_context("Failed to delete project tasks")?;

        let rows_affected = self
            .conn
            .execute(DELETE_PROJECT_SQL, params![id as i64])
            .db_context("Failed to delete project")?;

        Ok(rows_affected > 0)
    }

    /// Recomputes every stored `name_key` under `collation`.
    ///
    /// Fails without writing anything when two projects would share a key.
    pub(crate) fn rekey_projects(&self, collation: NameCollation) -> Result<usize> {
        let mut stmt = self
            .conn
            .prepare(SELECT_NAME_KEYS_SQL)
            .db_context("Failed to prepare query")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .db_context("Failed to query project names")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch project names")?;

        let mut owners: HashMap<String, &str> = HashMap::new();
        let mut changed = Vec::new();
        for (id, name, stored_key) in &rows {
            let key = collation.key(name);
            if let Some(other) = owners.insert(key.clone(), name) {
                return Err(TrackerError::configuration(format!(
                    "projects '{other}' and '{name}' have equal names under {collation} name collation"
                )));
            }
            if &key != stored_key {
                changed.push((*id, key));
            }
        }

        // Trimmed keys never start with a space, so the interim keys are free
        for (id, _) in &changed {
            self.conn
                .execute(UPDATE_NAME_KEY_SQL, params![format!(" {id}"), id])
                .db_context("Failed to update project name key")?;
        }
        for (id, key) in &changed {
            self.conn
                .execute(UPDATE_NAME_KEY_SQL, params![key, id])
                .db_context("Failed to update project name key")?;
        }

        if !changed.is_empty() {
            info!(
                "Recomputed {} project name key(s) for {collation} name collation",
                changed.len()
            );
        }
        Ok(changed.len())
    }
}
