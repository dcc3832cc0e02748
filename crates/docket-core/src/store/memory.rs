//! In-memory store backed by ordered maps.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Mutex,
};

use jiff::Timestamp;

use super::{sort_overdue, NewProject, NewTask, Repository, Store};
use crate::{
    error::{Result, TrackerError},
    models::{Project, Task},
};

/// Thread-safe in-memory store.
///
/// Each unit of work runs on a copy of the state which replaces the shared
/// state only when the work succeeds. Ids come from monotonic counters and
/// are never reused for the lifetime of the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
struct StoredProject {
    project: Project,
    name_key: String,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    projects: BTreeMap<u64, StoredProject>,
    tasks: BTreeMap<u64, Task>,
    name_index: HashMap<String, u64>,
    last_project_id: u64,
    last_task_id: u64,
}

impl MemoryState {
    fn with_tasks(&self, stored: &StoredProject) -> Project {
        let mut project = stored.project.clone();
        project.tasks = self.tasks_of(project.id);
        project
    }

    fn tasks_of(&self, project_id: u64) -> Vec<Task> {
        self.tasks
            .values()
            .filter(|task| task.project_id == project_id)
            .cloned()
            .collect()
    }

    fn claim_name(&mut self, name_key: &str, name: &str, project_id: u64) -> Result<()> {
        match self.name_index.get(name_key) {
            Some(owner) if *owner != project_id => Err(TrackerError::DuplicateName {
                name: name.to_string(),
            }),
            _ => {
                self.name_index.insert(name_key.to_string(), project_id);
                Ok(())
            }
        }
    }
}

impl Repository for MemoryState {
    fn insert_project(&mut self, new: &NewProject<'_>) -> Result<Project> {
        let id = self.last_project_id + 1;
        self.claim_name(new.name_key, new.name, id)?;
        self.last_project_id = id;

        let project = Project {
            id,
            name: new.name.to_string(),
            description: new.description.map(String::from),
            created_at: new.created_at,
            tasks: Vec::new(),
        };
        self.projects.insert(
            id,
            StoredProject {
                project: project.clone(),
                name_key: new.name_key.to_string(),
            },
        );
        Ok(project)
    }

    fn restore_project(&mut self, project: &Project, name_key: &str) -> Result<()> {
        if self.projects.contains_key(&project.id) {
            return Err(TrackerError::validation("id")
                .with_reason(format!("project id {} already present", project.id)));
        }
        self.claim_name(name_key, &project.name, project.id)?;
        self.last_project_id = self.last_project_id.max(project.id);

        let mut stored = project.clone();
        stored.tasks.clear();
        self.projects.insert(
            project.id,
            StoredProject {
                project: stored,
                name_key: name_key.to_string(),
            },
        );
        Ok(())
    }

    fn get_project(&self, id: u64) -> Result<Option<Project>> {
        Ok(self.projects.get(&id).map(|stored| self.with_tasks(stored)))
    }

    fn find_project_by_name_key(&self, name_key: &str) -> Result<Option<Project>> {
        Ok(self
            .name_index
            .get(name_key)
            .and_then(|id| self.projects.get(id))
            .map(|stored| self.with_tasks(stored)))
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self
            .projects
            .values()
            .map(|stored| self.with_tasks(stored))
            .collect())
    }

    fn count_projects(&self) -> Result<u64> {
        Ok(self.projects.len() as u64)
    }

    fn last_assigned_ids(&self) -> Result<(u64, u64)> {
        Ok((self.last_project_id, self.last_task_id))
    }

    fn update_project(&mut self, project: &Project, name_key: &str) -> Result<()> {
        let old_key = match self.projects.get(&project.id) {
            Some(stored) => stored.name_key.clone(),
            None => return Err(TrackerError::ProjectNotFound { id: project.id }),
        };

        self.claim_name(name_key, &project.name, project.id)?;
        if old_key != name_key {
            self.name_index.remove(&old_key);
        }

        if let Some(stored) = self.projects.get_mut(&project.id) {
            stored.project.name = project.name.clone();
            stored.project.description = project.description.clone();
            stored.name_key = name_key.to_string();
        }
        Ok(())
    }

    fn delete_project(&mut self, id: u64) -> Result<bool> {
        let Some(stored) = self.projects.remove(&id) else {
            return Ok(false);
        };
        self.name_index.remove(&stored.name_key);
        self.tasks.retain(|_, task| task.project_id != id);
        Ok(true)
    }

    fn insert_task(&mut self, new: &NewTask<'_>) -> Result<Task> {
        if !self.projects.contains_key(&new.project_id) {
            return Err(TrackerError::ProjectNotFound { id: new.project_id });
        }
        self.last_task_id += 1;

        let task = Task {
            id: self.last_task_id,
            project_id: new.project_id,
            title: new.title.to_string(),
            description: new.description.map(String::from),
            status: new.status.clone(),
            deadline: new.deadline,
            closed_at: new.closed_at,
        };
        self.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    fn restore_task(&mut self, task: &Task) -> Result<()> {
        if !self.projects.contains_key(&task.project_id) {
            return Err(TrackerError::ProjectNotFound {
                id: task.project_id,
            });
        }
        if self.tasks.contains_key(&task.id) {
            return Err(TrackerError::validation("id")
                .with_reason(format!("task id {} already present", task.id)));
        }
        self.last_task_id = self.last_task_id.max(task.id);
        self.tasks.insert(task.id, task.clone());
        Ok(())
    }

    fn get_task(&self, id: u64) -> Result<Option<Task>> {
        Ok(self.tasks.get(&id).cloned())
    }

    fn list_tasks(&self, project_id: u64) -> Result<Vec<Task>> {
        Ok(self.tasks_of(project_id))
    }

    fn count_tasks(&self, project_id: u64) -> Result<u64> {
        Ok(self
            .tasks
            .values()
            .filter(|task| task.project_id == project_id)
            .count() as u64)
    }

    fn update_task(&mut self, task: &Task) -> Result<()> {
        match self.tasks.get_mut(&task.id) {
            Some(stored) => {
                *stored = task.clone();
                Ok(())
            }
            None => Err(TrackerError::TaskNotFound { id: task.id }),
        }
    }

    fn delete_task(&mut self, id: u64) -> Result<bool> {
        Ok(self.tasks.remove(&id).is_some())
    }

    fn list_overdue_open(&self, now: Timestamp) -> Result<Vec<Task>> {
        let mut overdue: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| task.is_overdue(now))
            .cloned()
            .collect();
        sort_overdue(&mut overdue);
        Ok(overdue)
    }
}

impl Store for MemoryStore {
    fn atomically<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Repository) -> Result<T>,
    {
        let mut state = self
            .state
            .lock()
            .map_err(|e| TrackerError::storage(format!("memory store poisoned: {e}")))?;

        let mut draft = state.clone();
        let output = work(&mut draft)?;
        *state = draft;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use super::*;
    use crate::{error::ErrorKind, models::TaskStatus};

    fn new_project<'a>(name: &'a str, key: &'a str) -> NewProject<'a> {
        NewProject {
            name,
            name_key: key,
            description: None,
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn test_failed_unit_of_work_is_discarded() {
        let store = MemoryStore::new();

        let result: Result<()> = store.atomically(|repo| {
            repo.insert_project(&new_project("Work", "work"))?;
            Err(TrackerError::validation("name").with_reason("forced failure"))
        });
        assert!(result.is_err());

        let count = store.atomically(|repo| repo.count_projects()).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_name_index_rejects_duplicates() {
        let store = MemoryStore::new();
        store
            .atomically(|repo| repo.insert_project(&new_project("Work", "work")))
            .unwrap();

        let err = store
            .atomically(|repo| repo.insert_project(&new_project("WORK", "work")))
            .unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateName { .. }));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store
            .atomically(|repo| repo.insert_project(&new_project("A", "a")))
            .unwrap();
        store
            .atomically(|repo| repo.delete_project(first.id))
            .unwrap();
        let second = store
            .atomically(|repo| repo.insert_project(&new_project("B", "b")))
            .unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_delete_project_cascades_and_frees_name() {
        let store = MemoryStore::new();
        let status = TaskStatus::todo();
        let project = store
            .atomically(|repo| {
                let project = repo.insert_project(&new_project("Work", "work"))?;
                repo.insert_task(&NewTask {
                    project_id: project.id,
                    title: "t",
                    description: None,
                    status: &status,
                    deadline: None,
                    closed_at: None,
                })?;
                Ok(project)
            })
            .unwrap();

        assert!(store.atomically(|repo| repo.delete_project(project.id)).unwrap());
        assert_eq!(store.atomically(|repo| repo.count_tasks(project.id)).unwrap(), 0);
        assert!(store
            .atomically(|repo| repo.find_project_by_name_key("work"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_poisoned_lock_is_a_storage_error() {
        let store = MemoryStore::new();
        let panicked = panic::catch_unwind(AssertUnwindSafe(|| {
            let _: Result<()> = store.atomically(|_| panic!("work panicked"));
        }));
        assert!(panicked.is_err());

        let err = store.atomically(|repo| repo.count_projects()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().starts_with("Storage error"));
    }

    #[test]
    fn test_last_assigned_ids_survive_delete() {
        let store = MemoryStore::new();
        let project = store
            .atomically(|repo| repo.insert_project(&new_project("A", "a")))
            .unwrap();
        store
            .atomically(|repo| repo.delete_project(project.id))
            .unwrap();

        let ids = store.atomically(|repo| repo.last_assigned_ids()).unwrap();
        assert_eq!(ids, (project.id, 0));
    }
}
