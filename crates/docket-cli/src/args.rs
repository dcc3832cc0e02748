use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docket_core::{Config, NameCollation, StatusSet};

use crate::cli::{ExportArgs, ImportArgs, MaintenanceCommands, ProjectCommands, TaskCommands};

/// Main command-line interface for the Docket tracker
///
/// Docket keeps a small number of projects, each holding a bounded list of
/// tasks with a status and an optional deadline. Running it without a command
/// lists every project. The `serve` command exposes the same operations as an
/// MCP server for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "docket")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/docket/docket.db
    #[arg(long, global = true, env = "DOCKET_DATABASE_FILE")]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Business-rule settings, read from flags or the environment
#[derive(clap::Args)]
pub struct ConfigArgs {
    /// Maximum number of projects
    #[arg(
        long,
        global = true,
        env = "MAX_NUMBER_OF_PROJECTS",
        default_value_t = docket_core::config::DEFAULT_MAX_PROJECTS
    )]
    pub max_projects: u64,

    /// Maximum number of tasks in a single project
    #[arg(
        long,
        global = true,
        env = "MAX_NUMBER_OF_TASKS",
        default_value_t = docket_core::config::DEFAULT_MAX_TASKS_PER_PROJECT
    )]
    pub max_tasks: u64,

    /// Comma-separated list of allowed task statuses
    #[arg(long, global = true, env = "ALLOWED_STATUSES")]
    pub allowed_statuses: Option<String>,

    /// Project name comparison: 'insensitive' or 'sensitive'
    #[arg(long, global = true, env = "PROJECT_NAME_COLLATION")]
    pub name_collation: Option<String>,
}

impl ConfigArgs {
    /// Builds the tracker configuration, rejecting malformed values.
    pub fn to_config(&self) -> Result<Config> {
        let mut config = Config::default()
            .with_max_projects(self.max_projects)
            .with_max_tasks_per_project(self.max_tasks);

        if let Some(raw) = &self.allowed_statuses {
            let statuses: StatusSet = raw.parse().context("Invalid ALLOWED_STATUSES")?;
            config = config.with_allowed_statuses(statuses);
        }
        if let Some(raw) = &self.name_collation {
            let collation: NameCollation =
                raw.parse().context("Invalid PROJECT_NAME_COLLATION")?;
            config = config.with_name_collation(collation);
        }

        Ok(config)
    }
}

/// Available commands for the Docket CLI
///
/// - `project`: create, list, show, edit and delete projects
/// - `task`: manage tasks within projects
/// - `maintenance`: close overdue tasks, once or on a schedule
/// - `export` / `import`: move the whole store through a JSON snapshot
/// - `serve`: start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Manage projects
    #[command(alias = "p")]
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Manage tasks within projects
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Run maintenance jobs
    #[command(alias = "m")]
    Maintenance {
        #[command(subcommand)]
        command: MaintenanceCommands,
    },
    /// Export all projects and tasks as JSON
    Export(ExportArgs),
    /// Import a JSON snapshot into an empty database
    Import(ImportArgs),
    /// Start the MCP server
    Serve,
}
