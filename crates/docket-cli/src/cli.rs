//! Command-line argument structures and their handlers.
//!
//! Every subcommand has a clap `Args` struct that converts into the matching
//! `docket_core::params` structure:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```
//!
//! The [`Cli`] struct owns the tracker and the terminal renderer and turns
//! each command into one tracker call plus one rendered result.

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use docket_core::{
    params::*, AutocloseResult, CreateResult, DeleteResult, Snapshot, SqliteStore, Tracker,
    TrackerError, UpdateResult,
};
use log::{error, info};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Project arguments
// ============================================================================

/// Create a new project
///
/// Names are trimmed, limited to 30 words and must be unique. Descriptions
/// are limited to 150 words.
#[derive(Args)]
pub struct CreateProjectArgs {
    /// Name of the project
    pub name: String,
    #[arg(short, long, help = "Optional description of the project")]
    pub description: Option<String>,
}

impl From<CreateProjectArgs> for CreateProject {
    fn from(val: CreateProjectArgs) -> Self {
        CreateProject {
            name: val.name,
            description: val.description,
        }
    }
}

/// Show a project with all of its tasks
#[derive(Args)]
pub struct ShowProjectArgs {
    #[arg(help = "Unique identifier of the project to show")]
    pub id: u64,
}

impl From<ShowProjectArgs> for Id {
    fn from(val: ShowProjectArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit a project's name or description
///
/// Omitted fields are left unchanged. Pass an empty description to clear it.
#[derive(Args)]
pub struct EditProjectArgs {
    #[arg(help = "Unique identifier of the project to edit")]
    pub id: u64,
    #[arg(short, long, help = "New name for the project")]
    pub name: Option<String>,
    #[arg(short, long, help = "New description; empty string clears it")]
    pub description: Option<String>,
}

impl EditProjectArgs {
    fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if self.name.is_some() {
            changes.push("name".to_string());
        }
        if self.description.is_some() {
            changes.push("description".to_string());
        }
        changes
    }
}

impl From<EditProjectArgs> for EditProject {
    fn from(val: EditProjectArgs) -> Self {
        EditProject {
            id: val.id,
            name: val.name,
            description: val.description,
        }
    }
}

/// Delete a project and all of its tasks
#[derive(Args)]
pub struct DeleteProjectArgs {
    #[arg(help = "Unique identifier of the project to delete")]
    pub id: u64,
}

impl From<DeleteProjectArgs> for Id {
    fn from(val: DeleteProjectArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    #[command(alias = "c")]
    Create(CreateProjectArgs),
    /// List all projects
    #[command(alias = "l")]
    List,
    /// Show a project with its tasks
    #[command(alias = "s")]
    Show(ShowProjectArgs),
    /// Edit a project's name or description
    #[command(alias = "e")]
    Edit(EditProjectArgs),
    /// Delete a project and its tasks
    #[command(alias = "d")]
    Delete(DeleteProjectArgs),
}

// ============================================================================
// Task arguments
// ============================================================================

/// Add a task to a project
///
/// The deadline accepts `YYYY-MM-DD` (midnight UTC) or an ISO-8601
/// timestamp. The status defaults to `todo`.
#[derive(Args)]
pub struct AddTaskArgs {
    #[arg(help = "Unique identifier of the project receiving the task")]
    pub project_id: u64,
    /// Title of the task
    pub title: String,
    #[arg(short, long, help = "Optional description of the task")]
    pub description: Option<String>,
    #[arg(long, help = "Optional deadline (YYYY-MM-DD or ISO-8601 timestamp)")]
    pub deadline: Option<String>,
    #[arg(short, long, help = "Initial status (defaults to todo)")]
    pub status: Option<String>,
}

impl From<AddTaskArgs> for AddTask {
    fn from(val: AddTaskArgs) -> Self {
        AddTask {
            project_id: val.project_id,
            title: val.title,
            description: val.description,
            deadline: val.deadline,
            status: val.status,
        }
    }
}

/// List the tasks of a project
#[derive(Args)]
pub struct ListTasksArgs {
    #[arg(help = "Unique identifier of the project whose tasks to list")]
    pub project_id: u64,
}

impl From<ListTasksArgs> for Id {
    fn from(val: ListTasksArgs) -> Self {
        Id { id: val.project_id }
    }
}

/// Edit a task
///
/// Omitted fields are left unchanged. An empty description or deadline
/// clears it. Moving a task to `done` records the closing time; moving it
/// out of `done` clears it.
#[derive(Args)]
pub struct EditTaskArgs {
    #[arg(help = "Unique identifier of the task to edit")]
    pub id: u64,
    #[arg(short, long, help = "New title for the task")]
    pub title: Option<String>,
    #[arg(short, long, help = "New description; empty string clears it")]
    pub description: Option<String>,
    #[arg(long, help = "New deadline; empty string clears it")]
    pub deadline: Option<String>,
    #[arg(short, long, help = "New status")]
    pub status: Option<String>,
}

impl EditTaskArgs {
    fn changes(&self) -> Vec<String> {
        [
            ("title", self.title.is_some()),
            ("description", self.description.is_some()),
            ("deadline", self.deadline.is_some()),
            ("status", self.status.is_some()),
        ]
        .into_iter()
        .filter(|(_, changed)| *changed)
        .map(|(field, _)| field.to_string())
        .collect()
    }
}

impl From<EditTaskArgs> for EditTask {
    fn from(val: EditTaskArgs) -> Self {
        EditTask {
            id: val.id,
            title: val.title,
            description: val.description,
            deadline: val.deadline,
            status: val.status,
        }
    }
}

/// Change only the status of a task
#[derive(Args)]
pub struct TaskStatusArgs {
    #[arg(help = "Unique identifier of the task")]
    pub id: u64,
    #[arg(help = "New status, matched case-insensitively")]
    pub status: String,
}

impl From<TaskStatusArgs> for ChangeStatus {
    fn from(val: TaskStatusArgs) -> Self {
        ChangeStatus {
            id: val.id,
            status: val.status,
        }
    }
}

/// Delete a task
#[derive(Args)]
pub struct DeleteTaskArgs {
    #[arg(help = "Unique identifier of the task to delete")]
    pub id: u64,
}

impl From<DeleteTaskArgs> for Id {
    fn from(val: DeleteTaskArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to a project
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// List the tasks of a project
    #[command(alias = "l")]
    List(ListTasksArgs),
    /// Edit a task
    #[command(alias = "e")]
    Edit(EditTaskArgs),
    /// Change the status of a task
    #[command(alias = "st")]
    Status(TaskStatusArgs),
    /// Delete a task
    #[command(alias = "d")]
    Delete(DeleteTaskArgs),
    /// List open tasks whose deadline has passed
    #[command(alias = "o")]
    Overdue,
}

// ============================================================================
// Maintenance, export and import arguments
// ============================================================================

/// Close every open task whose deadline has passed
#[derive(Args)]
pub struct AutocloseArgs {
    #[arg(long, help = "Report overdue tasks without closing them")]
    pub dry_run: bool,
}

impl From<AutocloseArgs> for Autoclose {
    fn from(val: AutocloseArgs) -> Self {
        Autoclose {
            dry_run: val.dry_run,
        }
    }
}

/// Longest accepted sweep interval: one week.
const MAX_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

/// Run the autoclose sweep periodically until interrupted
#[derive(Args)]
pub struct ScheduleArgs {
    #[arg(
        long,
        default_value_t = 15,
        value_parser = clap::value_parser!(u64).range(1..=MAX_INTERVAL_MINUTES),
        help = "Minutes between sweeps, at most one week"
    )]
    pub interval_minutes: u64,
}

#[derive(Subcommand)]
pub enum MaintenanceCommands {
    /// Close overdue tasks once
    #[command(alias = "a")]
    Autoclose(AutocloseArgs),
    /// Close overdue tasks on a fixed interval
    #[command(alias = "s")]
    Schedule(ScheduleArgs),
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(short, long, help = "Write the snapshot to a file instead of stdout")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[arg(help = "Path of a snapshot written by `docket export`")]
    pub file: PathBuf,
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs parsed commands against a tracker and renders the results.
pub struct Cli {
    tracker: Tracker<SqliteStore>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: Tracker<SqliteStore>, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    pub async fn handle_project_command(&self, command: ProjectCommands) -> Result<()> {
        match command {
            ProjectCommands::Create(args) => {
                let project = self.tracker.create_project(&args.into()).await?;
                self.renderer
                    .render(&CreateResult::new(project).to_string())
            }
            ProjectCommands::List => self.list_projects().await,
            ProjectCommands::Show(args) => {
                let params: Id = args.into();
                let project = self
                    .tracker
                    .get_project(&params)
                    .await?
                    .ok_or(TrackerError::ProjectNotFound { id: params.id })?;
                self.renderer.render(&project.to_string())
            }
            ProjectCommands::Edit(args) => {
                let changes = args.changes();
                let project = self.tracker.edit_project(&args.into()).await?;
                self.renderer
                    .render(&UpdateResult::with_changes(project, changes).to_string())
            }
            ProjectCommands::Delete(args) => {
                let project = self.tracker.delete_project(&args.into()).await?;
                self.renderer
                    .render(&DeleteResult::new(project).to_string())
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let task = self.tracker.add_task(&args.into()).await?;
                self.renderer.render(&CreateResult::new(task).to_string())
            }
            TaskCommands::List(args) => {
                let tasks = self.tracker.list_tasks_by_project(&args.into()).await?;
                self.renderer.render(&tasks.to_string())
            }
            TaskCommands::Edit(args) => {
                let changes = args.changes();
                let task = self.tracker.edit_task(&args.into()).await?;
                self.renderer
                    .render(&UpdateResult::with_changes(task, changes).to_string())
            }
            TaskCommands::Status(args) => {
                let task = self.tracker.change_task_status(&args.into()).await?;
                let result = UpdateResult::with_changes(task, vec!["status".to_string()]);
                self.renderer.render(&result.to_string())
            }
            TaskCommands::Delete(args) => {
                let task = self.tracker.delete_task(&args.into()).await?;
                self.renderer.render(&DeleteResult::new(task).to_string())
            }
            TaskCommands::Overdue => {
                let tasks = self.tracker.list_overdue_tasks().await?;
                self.renderer.render(&tasks.to_string())
            }
        }
    }

    pub async fn handle_maintenance_command(&self, command: MaintenanceCommands) -> Result<()> {
        match command {
            MaintenanceCommands::Autoclose(args) => {
                let result = self.tracker.autoclose_overdue_tasks(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
            MaintenanceCommands::Schedule(args) => self.run_schedule(&args).await,
        }
    }

    /// Lists every project; also the default when no command is given.
    pub async fn list_projects(&self) -> Result<()> {
        let projects = self.tracker.list_projects().await?;
        self.renderer.render(&projects.to_string())
    }

    pub async fn export(&self, args: ExportArgs) -> Result<()> {
        let snapshot = self.tracker.export_snapshot().await?;
        let json = serde_json::to_string_pretty(&snapshot)
            .context("Failed to serialize snapshot")?;

        match args.output {
            Some(path) => {
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Exported snapshot to {}", path.display());
                self.renderer.render(&format!(
                    "Exported {} project(s) and {} task(s) to {}\n",
                    snapshot.projects.len(),
                    snapshot.tasks.len(),
                    path.display()
                ))
            }
            None => {
                println!("{json}");
                Ok(())
            }
        }
    }

    pub async fn import(&self, args: ImportArgs) -> Result<()> {
        let json = std::fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&json)
            .map_err(TrackerError::from)
            .with_context(|| format!("Failed to parse {}", args.file.display()))?;

        let result = self.tracker.import_snapshot(snapshot).await?;
        self.renderer.render(&result.to_string())
    }

    async fn run_schedule(&self, args: &ScheduleArgs) -> Result<()> {
        let period = Duration::from_secs(args.interval_minutes * 60);
        let mut interval = tokio::time::interval(period);
        info!(
            "Closing overdue tasks every {} minute(s)",
            args.interval_minutes
        );

        // Must outlive the loop so an interrupt arriving mid-sweep is kept
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = interval.tick() => self.sweep().await,
                _ = &mut shutdown => {
                    info!("Received interrupt, stopping scheduler");
                    return Ok(());
                }
            }
        }
    }

    /// One scheduled sweep. Failures are logged and the schedule keeps going.
    async fn sweep(&self) {
        match self
            .tracker
            .autoclose_overdue_tasks(&Autoclose { dry_run: false })
            .await
        {
            Ok(result) => self.report_sweep(&result),
            Err(e) => error!("Scheduled autoclose failed: {e}"),
        }
    }

    fn report_sweep(&self, result: &AutocloseResult) {
        info!("Scheduled autoclose closed {} task(s)", result.tasks.len());
        if !result.tasks.is_empty() {
            if let Err(e) = self.renderer.render(&result.to_string()) {
                error!("Failed to render sweep result: {e}");
            }
        }
    }
}
