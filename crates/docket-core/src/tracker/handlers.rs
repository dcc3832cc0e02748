//! Presentation calls shared by the CLI and the MCP server.
//!
//! Each handler takes a [`crate::params`] structure, runs the matching service
//! operation off the async runtime and returns either a model or one of the
//! [`crate::display`] wrappers.

use jiff::Timestamp;

use super::Tracker;
use crate::{
    display::{AutocloseResult, ImportResult, Projects, Tasks},
    error::Result,
    models::{Project, Task},
    params::{AddTask, Autoclose, ChangeStatus, CreateProject, EditProject, EditTask, Id},
    service::TaskChanges,
    snapshot::{self, Snapshot},
    store::Store,
};

impl<S: Store + 'static> Tracker<S> {
    /// Handle creating a new project.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use docket_core::{params::CreateProject, TrackerBuilder};
    /// # async {
    /// let tracker = TrackerBuilder::new().build_in_memory();
    /// let project = tracker
    ///     .create_project(&CreateProject {
    ///         name: "  Work ".to_string(),
    ///         description: None,
    ///     })
    ///     .await?;
    /// assert_eq!(project.name, "Work");
    /// # Result::<(), docket_core::TrackerError>::Ok(())
    /// # };
    /// ```
    pub async fn create_project(&self, params: &CreateProject) -> Result<Project> {
        let params = params.clone();
        self.run_blocking(move |tracker| {
            tracker
                .projects()
                .create(&params.name, params.description.as_deref())
        })
        .await
    }

    /// Handle listing all projects with their tasks.
    pub async fn list_projects(&self) -> Result<Projects> {
        self.run_blocking(|tracker| tracker.projects().list().map(Projects))
            .await
    }

    /// Handle showing a project with its tasks.
    pub async fn get_project(&self, params: &Id) -> Result<Option<Project>> {
        let id = params.id;
        self.run_blocking(move |tracker| tracker.projects().get(id))
            .await
    }

    /// Handle editing a project's name or description.
    pub async fn edit_project(&self, params: &EditProject) -> Result<Project> {
        let params = params.clone();
        self.run_blocking(move |tracker| {
            tracker.projects().edit(
                params.id,
                params.name.as_deref(),
                params.description.as_deref(),
            )
        })
        .await
    }

    /// Handle deleting a project and its tasks.
    ///
    /// Uses get-before-delete so the deleted project can be shown.
    pub async fn delete_project(&self, params: &Id) -> Result<Project> {
        let id = params.id;
        self.run_blocking(move |tracker| tracker.projects().delete(id))
            .await
    }

    /// Handle adding a task to a project.
    pub async fn add_task(&self, params: &AddTask) -> Result<Task> {
        let params = params.clone();
        self.run_blocking(move |tracker| {
            tracker.tasks().add(
                params.project_id,
                &params.title,
                params.description.as_deref(),
                params.deadline.as_deref(),
                params.status.as_deref(),
            )
        })
        .await
    }

    /// Handle showing a single task.
    pub async fn get_task(&self, params: &Id) -> Result<Option<Task>> {
        let id = params.id;
        self.run_blocking(move |tracker| tracker.tasks().get(id))
            .await
    }

    /// Handle listing the tasks of a project.
    pub async fn list_tasks_by_project(&self, params: &Id) -> Result<Tasks> {
        let id = params.id;
        self.run_blocking(move |tracker| tracker.tasks().list_by_project(id).map(Tasks))
            .await
    }

    /// Handle editing a task.
    pub async fn edit_task(&self, params: &EditTask) -> Result<Task> {
        let params = params.clone();
        self.run_blocking(move |tracker| {
            tracker.tasks().edit(
                params.id,
                TaskChanges {
                    title: params.title.as_deref(),
                    description: params.description.as_deref(),
                    deadline: params.deadline.as_deref(),
                    status: params.status.as_deref(),
                },
            )
        })
        .await
    }

    /// Handle changing a task's status.
    pub async fn change_task_status(&self, params: &ChangeStatus) -> Result<Task> {
        let params = params.clone();
        self.run_blocking(move |tracker| tracker.tasks().change_status(params.id, &params.status))
            .await
    }

    /// Handle deleting a task.
    pub async fn delete_task(&self, params: &Id) -> Result<Task> {
        let id = params.id;
        self.run_blocking(move |tracker| tracker.tasks().delete(id))
            .await
    }

    /// Handle listing open tasks whose deadline has passed.
    pub async fn list_overdue_tasks(&self) -> Result<Tasks> {
        self.run_blocking(|tracker| {
            tracker
                .tasks()
                .list_overdue_open(Timestamp::now())
                .map(Tasks)
        })
        .await
    }

    /// Handle the maintenance sweep that closes overdue tasks.
    ///
    /// With `dry_run` the overdue tasks are reported but left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use docket_core::{params::{AddTask, Autoclose, CreateProject}, TrackerBuilder};
    /// # async {
    /// let tracker = TrackerBuilder::new().build_in_memory();
    /// let project = tracker
    ///     .create_project(&CreateProject { name: "Work".into(), description: None })
    ///     .await?;
    /// tracker
    ///     .add_task(&AddTask {
    ///         project_id: project.id,
    ///         title: "Late".into(),
    ///         deadline: Some("2020-01-01".into()),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    ///
    /// let preview = tracker.autoclose_overdue_tasks(&Autoclose { dry_run: true }).await?;
    /// assert_eq!(preview.tasks.len(), 1);
    /// let closed = tracker.autoclose_overdue_tasks(&Autoclose { dry_run: false }).await?;
    /// assert_eq!(closed.tasks.len(), 1);
    /// # Result::<(), docket_core::TrackerError>::Ok(())
    /// # };
    /// ```
    pub async fn autoclose_overdue_tasks(&self, params: &Autoclose) -> Result<AutocloseResult> {
        let dry_run = params.dry_run;
        self.run_blocking(move |tracker| {
            let now = Timestamp::now();
            let tasks = if dry_run {
                tracker.tasks().list_overdue_open(now)?
            } else {
                tracker.tasks().autoclose_overdue_tasks(now)?
            };
            Ok(AutocloseResult::new(tasks, dry_run))
        })
        .await
    }

    /// Handle exporting every project and task.
    pub async fn export_snapshot(&self) -> Result<Snapshot> {
        self.run_blocking(|tracker| snapshot::export(tracker.store()))
            .await
    }

    /// Handle importing a snapshot into an empty store.
    pub async fn import_snapshot(&self, snapshot: Snapshot) -> Result<ImportResult> {
        self.run_blocking(move |tracker| {
            snapshot::import(tracker.store(), tracker.config(), snapshot)
                .map(|(projects, tasks)| ImportResult { projects, tasks })
        })
        .await
    }
}
