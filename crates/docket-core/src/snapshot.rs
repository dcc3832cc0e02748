//! Portable snapshot of every stored project and task.
//!
//! A snapshot mirrors the persisted record shape: ids and timestamps are kept
//! as stored, tasks reference their project by id. Exporting one store and
//! importing the result into an empty store reproduces the same data.

use std::collections::HashMap;

use jiff::Timestamp;
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{Result, TrackerError},
    models::{
        text::{optional_text, required_text, MAX_DESCRIPTION_WORDS, MAX_NAME_WORDS},
        Project, Task, TaskStatus,
    },
    store::Store,
};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// All projects and tasks of a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub projects: Vec<ProjectRecord>,
    pub tasks: Vec<TaskRecord>,
}

/// Stored shape of a project, without its tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// Stored shape of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: u64,
    pub project_id: u64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub deadline: Option<Timestamp>,
    pub closed_at: Option<Timestamp>,
}

impl From<&Project> for ProjectRecord {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
            created_at: project.created_at,
        }
    }
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            created_at: record.created_at,
            tasks: Vec::new(),
        }
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            project_id: task.project_id,
            title: task.title,
            description: task.description,
            status: task.status,
            deadline: task.deadline,
            closed_at: task.closed_at,
        }
    }
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            project_id: record.project_id,
            title: record.title,
            description: record.description,
            status: record.status,
            deadline: record.deadline,
            closed_at: record.closed_at,
        }
    }
}

/// Reads every project and task from `store` in one unit of work.
pub fn export<S: Store>(store: &S) -> Result<Snapshot> {
    let projects = store.atomically(|repo| repo.list_projects())?;

    let records = projects.iter().map(ProjectRecord::from).collect();
    let tasks = projects
        .into_iter()
        .flat_map(|project| project.tasks)
        .map(TaskRecord::from)
        .collect();

    Ok(Snapshot {
        version: SNAPSHOT_VERSION,
        projects: records,
        tasks,
    })
}

/// Loads `snapshot` into an empty store, keeping ids and timestamps.
///
/// Records go through the same text rules as interactive input, so names and
/// titles are trimmed and checked against the word limits.
///
/// # Errors
///
/// - `Configuration` for an unsupported snapshot version
/// - `Validation` for invalid text, a `closed_at` that disagrees with the
///   status, an id the store already handed out, or a store that already
///   holds projects
/// - `CapacityExceeded` if the snapshot exceeds the configured ceilings
/// - `InvalidStatus` for a task status outside the allowed set
/// - `ProjectNotFound` for a task referencing an unknown project
/// - `DuplicateName` for two projects with equal names
pub fn import<S: Store>(store: &S, config: &Config, snapshot: Snapshot) -> Result<(usize, usize)> {
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(TrackerError::configuration(format!(
            "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
            snapshot.version
        )));
    }

    if snapshot.projects.len() as u64 > config.max_projects {
        return Err(TrackerError::CapacityExceeded {
            resource: "projects",
            limit: config.max_projects,
        });
    }

    let projects = snapshot
        .projects
        .into_iter()
        .map(normalize_project)
        .collect::<Result<Vec<_>>>()?;

    let mut per_project: HashMap<u64, u64> = HashMap::new();
    let mut tasks = Vec::with_capacity(snapshot.tasks.len());
    for task in snapshot.tasks {
        if !config.allowed_statuses.contains(&task.status) {
            return Err(TrackerError::InvalidStatus {
                status: task.status.as_str().to_string(),
                allowed: config.allowed_statuses.to_string(),
            });
        }
        let count = per_project.entry(task.project_id).or_default();
        *count += 1;
        if *count > config.max_tasks_per_project {
            return Err(TrackerError::CapacityExceeded {
                resource: "tasks in this project",
                limit: config.max_tasks_per_project,
            });
        }
        tasks.push(normalize_task(task)?);
    }

    let counts = (projects.len(), tasks.len());
    store.atomically(|repo| {
        if repo.count_projects()? > 0 {
            return Err(TrackerError::validation("snapshot")
                .with_reason("import requires an empty store"));
        }

        let (last_project_id, last_task_id) = repo.last_assigned_ids()?;
        if let Some(project) = projects.iter().find(|p| p.id <= last_project_id) {
            return Err(TrackerError::validation("id").with_reason(format!(
                "project id {} was already used in this store",
                project.id
            )));
        }
        if let Some(task) = tasks.iter().find(|t| t.id <= last_task_id) {
            return Err(TrackerError::validation("id").with_reason(format!(
                "task id {} was already used in this store",
                task.id
            )));
        }

        for project in &projects {
            let name_key = config.name_collation.key(&project.name);
            repo.restore_project(project, &name_key)?;
        }
        for task in &tasks {
            repo.restore_task(task)?;
        }
        Ok(())
    })?;

    info!("Imported {} project(s) and {} task(s)", counts.0, counts.1);
    Ok(counts)
}

fn normalize_project(record: ProjectRecord) -> Result<Project> {
    let name = required_text("name", &record.name, MAX_NAME_WORDS)?;
    let description = optional_text(
        "description",
        record.description.as_deref(),
        MAX_DESCRIPTION_WORDS,
    )?;
    Ok(Project {
        name,
        description,
        ..Project::from(record)
    })
}

fn normalize_task(record: TaskRecord) -> Result<Task> {
    let title = required_text("title", &record.title, MAX_NAME_WORDS)?;
    let description = optional_text(
        "description",
        record.description.as_deref(),
        MAX_DESCRIPTION_WORDS,
    )?;

    match (record.status.is_done(), record.closed_at.is_some()) {
        (true, false) => {
            return Err(TrackerError::validation("closed_at").with_reason(format!(
                "task {} is done but has no closing time",
                record.id
            )))
        }
        (false, true) => {
            return Err(TrackerError::validation("closed_at").with_reason(format!(
                "task {} is not done but has a closing time",
                record.id
            )))
        }
        _ => {}
    }

    Ok(Task {
        title,
        description,
        ..Task::from(record)
    })
}
