//! SQLite-backed store.

use std::path::{Path, PathBuf};

use jiff::Timestamp;

use super::{NewProject, NewTask, Repository, Store};
use crate::{
    config::NameCollation,
    db::{Database, SqliteRepository},
    error::{DatabaseResultExt, Result},
    models::{Project, Task},
};

/// Store that opens one connection and one transaction per unit of work.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Creates a store for the database at `path`, initializing the schema.
    ///
    /// Stored name keys are recomputed under `collation`, so a database
    /// written under another collation keeps enforcing unique names.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Configuration` if two stored projects have
    /// equal names under `collation`.
    pub fn new<P: AsRef<Path>>(path: P, collation: NameCollation) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let mut db = Database::new(&db_path)?;

        let tx = db.transaction()?;
        SqliteRepository::new(&tx).rekey_projects(collation)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Self { db_path })
    }

    /// Location of the database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }
}

impl Store for SqliteStore {
    fn atomically<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Repository) -> Result<T>,
    {
        let mut db = Database::new(&self.db_path)?;
        let tx = db.transaction()?;

        // Dropping `tx` on the error path rolls back
        let output = work(&mut SqliteRepository::new(&tx))?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(output)
    }
}

impl Repository for SqliteRepository<'_> {
    fn insert_project(&mut self, project: &NewProject<'_>) -> Result<Project> {
        self.insert_project_row(project)
    }

    fn restore_project(&mut self, project: &Project, name_key: &str) -> Result<()> {
        self.restore_project_row(project, name_key)
    }

    fn get_project(&self, id: u64) -> Result<Option<Project>> {
        self.select_project(id)
    }

    fn find_project_by_name_key(&self, name_key: &str) -> Result<Option<Project>> {
        self.select_project_by_key(name_key)
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        self.select_projects()
    }

    fn count_projects(&self) -> Result<u64> {
        self.count_project_rows()
    }

    fn last_assigned_ids(&self) -> Result<(u64, u64)> {
        Ok((self.last_sequence("projects")?, self.last_sequence("tasks")?))
    }

    fn update_project(&mut self, project: &Project, name_key: &str) -> Result<()> {
        self.update_project_row(project, name_key)
    }

    fn delete_project(&mut self, id: u64) -> Result<bool> {
        self.delete_project_row(id)
    }

    fn insert_task(&mut self, task: &NewTask<'_>) -> Result<Task> {
        self.insert_task_row(task)
    }

    fn restore_task(&mut self, task: &Task) -> Result<()> {
        self.restore_task_row(task)
    }

    fn get_task(&self, id: u64) -> Result<Option<Task>> {
        self.select_task(id)
    }

    fn list_tasks(&self, project_id: u64) -> Result<Vec<Task>> {
        self.select_tasks(project_id)
    }

    fn count_tasks(&self, project_id: u64) -> Result<u64> {
        self.count_task_rows(project_id)
    }

    fn update_task(&mut self, task: &Task) -> Result<()> {
        self.update_task_row(task)
    }

    fn delete_task(&mut self, id: u64) -> Result<bool> {
        self.delete_task_row(id)
    }

    fn list_overdue_open(&self, now: Timestamp) -> Result<Vec<Task>> {
        self.select_overdue_open(now)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::error::TrackerError;

    fn create_test_store() -> (SqliteStore, TempDir) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SqliteStore::new(dir.path().join("docket.db"), NameCollation::default())
            .expect("Failed to create store");
        (store, dir)
    }

    fn new_project<'a>(name: &'a str, key: &'a str) -> NewProject<'a> {
        NewProject {
            name,
            name_key: key,
            description: Some("desc"),
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn test_rollback_on_error() {
        let (store, _dir) = create_test_store();

        let result: Result<()> = store.atomically(|repo| {
            repo.insert_project(&new_project("Work", "work"))?;
            Err(TrackerError::validation("name").with_reason("forced failure"))
        });
        assert!(result.is_err());

        let count = store
            .atomically(|repo| repo.count_projects())
            .expect("Failed to count");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_unique_index_maps_to_duplicate_name() {
        let (store, _dir) = create_test_store();
        store
            .atomically(|repo| repo.insert_project(&new_project("Work", "work")))
            .expect("Failed to insert project");

        let err = store
            .atomically(|repo| repo.insert_project(&new_project("WORK", "work")))
            .unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateName { name } if name == "WORK"));
    }

    #[test]
    fn test_round_trips_timestamps() {
        let (store, _dir) = create_test_store();
        let created = store
            .atomically(|repo| repo.insert_project(&new_project("Work", "work")))
            .expect("Failed to insert project");

        let fetched = store
            .atomically(|repo| repo.get_project(created.id))
            .expect("Failed to fetch project")
            .expect("Project should exist");
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_data_survives_reopen() {
        let (store, dir) = create_test_store();
        store
            .atomically(|repo| repo.insert_project(&new_project("Work", "work")))
            .expect("Failed to insert project");

        let reopened = SqliteStore::new(dir.path().join("docket.db"), NameCollation::default())
            .expect("Failed to reopen");
        let projects = reopened
            .atomically(|repo| repo.list_projects())
            .expect("Failed to list projects");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Work");
    }

    #[test]
    fn test_reopen_recomputes_name_keys_for_new_collation() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("docket.db");
        let sensitive =
            SqliteStore::new(&path, NameCollation::CaseSensitive).expect("Failed to create store");
        sensitive
            .atomically(|repo| repo.insert_project(&new_project("Work", "Work")))
            .expect("Failed to insert project");

        let insensitive =
            SqliteStore::new(&path, NameCollation::CaseInsensitive).expect("Failed to reopen");
        let found = insensitive
            .atomically(|repo| repo.find_project_by_name_key("work"))
            .expect("Failed to query")
            .expect("Project should be found by its new key");
        assert_eq!(found.name, "Work");

        let err = insensitive
            .atomically(|repo| repo.insert_project(&new_project("work", "work")))
            .unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateName { .. }));
    }

    #[test]
    fn test_reopen_fails_when_names_collide_under_new_collation() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("docket.db");
        let sensitive =
            SqliteStore::new(&path, NameCollation::CaseSensitive).expect("Failed to create store");
        sensitive
            .atomically(|repo| {
                repo.insert_project(&new_project("Work", "Work"))?;
                repo.insert_project(&new_project("work", "work"))
            })
            .expect("Failed to insert projects");

        let err = SqliteStore::new(&path, NameCollation::CaseInsensitive).unwrap_err();
        assert!(matches!(err, TrackerError::Configuration { .. }));
        assert!(err.to_string().contains("'Work' and 'work'"));

        // Nothing was rewritten, so the old collation still opens the file
        SqliteStore::new(&path, NameCollation::CaseSensitive).expect("Failed to reopen");
    }

    #[test]
    fn test_last_assigned_ids_follow_autoincrement() {
        let (store, _dir) = create_test_store();
        let (project, task) = store
            .atomically(|repo| {
                let project = repo.insert_project(&new_project("Work", "work"))?;
                let status = crate::models::TaskStatus::todo();
                let task = repo.insert_task(&NewTask {
                    project_id: project.id,
                    title: "t",
                    description: None,
                    status: &status,
                    deadline: None,
                    closed_at: None,
                })?;
                Ok((project, task))
            })
            .expect("Failed to insert");
        store
            .atomically(|repo| repo.delete_project(project.id))
            .expect("Failed to delete");

        let ids = store
            .atomically(|repo| repo.last_assigned_ids())
            .expect("Failed to read ids");
        assert_eq!(ids, (project.id, task.id));
    }
}
