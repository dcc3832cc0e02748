//! Docket CLI Application
//!
//! Command-line interface and MCP server for the Docket project and task
//! tracker.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use docket_core::{ErrorKind, TrackerBuilder, TrackerError};
use log::info;
use mcp::{run_stdio_server, DocketMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables still apply
    dotenvy::dotenv().ok();
    env_logger::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let Args {
        database_file,
        no_color,
        config,
        command,
    } = args;

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .with_config(config.to_config()?)
        .build()
        .context("Failed to initialize tracker")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Docket started");

    match command {
        Some(Project { command }) => {
            Cli::new(tracker, renderer)
                .handle_project_command(command)
                .await
        }
        Some(Task { command }) => {
            Cli::new(tracker, renderer)
                .handle_task_command(command)
                .await
        }
        Some(Maintenance { command }) => {
            Cli::new(tracker, renderer)
                .handle_maintenance_command(command)
                .await
        }
        Some(Export(args)) => Cli::new(tracker, renderer).export(args).await,
        Some(Import(args)) => Cli::new(tracker, renderer).import(args).await,
        Some(Serve) => {
            info!("Starting Docket MCP server");
            run_stdio_server(DocketMcpServer::new(tracker))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(tracker, renderer).list_projects().await,
    }
}

/// Maps an error to the process exit code.
///
/// 2: invalid input or configuration, 3: missing project or task,
/// 4: duplicate name or capacity reached, 1: anything else.
fn exit_code(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<TrackerError>().map(TrackerError::kind) {
        Some(
            ErrorKind::Validation
            | ErrorKind::InvalidStatus
            | ErrorKind::InvalidDeadline
            | ErrorKind::Configuration,
        ) => 2,
        Some(ErrorKind::NotFound) => 3,
        Some(ErrorKind::DuplicateName | ErrorKind::CapacityExceeded) => 4,
        Some(ErrorKind::Storage) | None => 1,
    }
}
