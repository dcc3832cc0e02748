//! MCP server implementation for Docket
//!
//! Exposes the tracker operations as Model Context Protocol tools over stdio
//! so AI assistants can manage projects and tasks.

use std::future::Future;

use anyhow::Result;
use docket_core::{SqliteStore, Tracker};
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

use handlers::{
    AddTask, Autoclose, ChangeStatus, CreateProject, EditProject, EditTask, Id, ImportSnapshot,
    McpHandlers, McpResult,
};

const INSTRUCTIONS: &str = r#"Docket tracks a small number of projects, each holding a bounded list of tasks.

## Core Concepts
- **Projects**: a unique name (at most 30 words) and an optional description (at most 150 words)
- **Tasks**: belong to one project; a title, optional description, a status (todo/doing/done by default) and an optional deadline

## Rules
- The number of projects and the number of tasks per project are capped
- Statuses are matched case-insensitively
- Deadlines accept YYYY-MM-DD or an ISO-8601 timestamp; empty strings clear them on edit
- Deleting a project deletes its tasks
- Moving a task to 'done' records when it was closed

## Tool Categories
- **Projects**: create_project, list_projects, show_project, edit_project, delete_project
- **Tasks**: add_task, list_tasks, show_task, edit_task, change_task_status, delete_task
- **Maintenance**: list_overdue_tasks, autoclose_overdue_tasks, export_snapshot, import_snapshot"#;

/// MCP server for Docket
#[derive(Clone)]
pub struct DocketMcpServer {
    tracker: Tracker<SqliteStore>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DocketMcpServer {
    pub fn new(tracker: Tracker<SqliteStore>) -> Self {
        Self {
            tracker,
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> McpHandlers {
        McpHandlers::new(self.tracker.clone())
    }

    #[tool(
        name = "create_project",
        description = "Create a new project. Provide a unique name (required, at most 30 words) and an optional description (at most 150 words). Fails when the project limit is reached. Returns the new project ID for adding tasks."
    )]
    async fn create_project(&self, params: Parameters<CreateProject>) -> McpResult {
        self.handlers().create_project(params).await
    }

    #[tool(
        name = "list_projects",
        description = "List all projects in creation order, each with its tasks, their status and deadlines."
    )]
    async fn list_projects(&self) -> McpResult {
        self.handlers().list_projects().await
    }

    #[tool(
        name = "show_project",
        description = "Display a single project by ID with its description, creation time and every task."
    )]
    async fn show_project(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_project(params).await
    }

    #[tool(
        name = "edit_project",
        description = "Rename a project or change its description. Omitted fields are left unchanged; an empty description clears it. The new name must not collide with another project."
    )]
    async fn edit_project(&self, params: Parameters<EditProject>) -> McpResult {
        self.handlers().edit_project(params).await
    }

    #[tool(
        name = "delete_project",
        description = "Permanently delete a project and all of its tasks. This cannot be undone."
    )]
    async fn delete_project(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_project(params).await
    }

    #[tool(
        name = "add_task",
        description = "Add a task to a project. Requires project_id and title (at most 30 words). Optional: description (at most 150 words), deadline (YYYY-MM-DD or ISO-8601 timestamp) and status (defaults to 'todo'). Fails when the project's task limit is reached."
    )]
    async fn add_task(&self, params: Parameters<AddTask>) -> McpResult {
        self.handlers().add_task(params).await
    }

    #[tool(
        name = "list_tasks",
        description = "List the tasks of a project (pass the project ID as 'id'), ordered by task ID."
    )]
    async fn list_tasks(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().list_tasks(params).await
    }

    #[tool(
        name = "show_task",
        description = "Display a single task by ID with its status, deadline, closing time and description."
    )]
    async fn show_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(
        name = "edit_task",
        description = "Modify a task's title, description, deadline or status. Omitted fields are left unchanged; an empty description or deadline clears it. Moving to 'done' records the closing time, moving out of 'done' clears it."
    )]
    async fn edit_task(&self, params: Parameters<EditTask>) -> McpResult {
        self.handlers().edit_task(params).await
    }

    #[tool(
        name = "change_task_status",
        description = "Change only the status of a task. The status is matched case-insensitively against the allowed statuses."
    )]
    async fn change_task_status(&self, params: Parameters<ChangeStatus>) -> McpResult {
        self.handlers().change_task_status(params).await
    }

    #[tool(
        name = "delete_task",
        description = "Permanently delete a task by ID."
    )]
    async fn delete_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_task(params).await
    }

    #[tool(
        name = "list_overdue_tasks",
        description = "List open tasks whose deadline has passed, earliest deadline first."
    )]
    async fn list_overdue_tasks(&self) -> McpResult {
        self.handlers().list_overdue_tasks().await
    }

    #[tool(
        name = "autoclose_overdue_tasks",
        description = "Mark every overdue open task as done. With dry_run=true the overdue tasks are only reported."
    )]
    async fn autoclose_overdue_tasks(&self, params: Parameters<Autoclose>) -> McpResult {
        self.handlers().autoclose_overdue_tasks(params).await
    }

    #[tool(
        name = "export_snapshot",
        description = "Export every project and task as a JSON snapshot."
    )]
    async fn export_snapshot(&self) -> McpResult {
        self.handlers().export_snapshot().await
    }

    #[tool(
        name = "import_snapshot",
        description = "Load a JSON snapshot, as returned by export_snapshot, into an empty database. Ids and timestamps are kept. Fails if any project already exists or a record breaks the naming, status or limit rules."
    )]
    async fn import_snapshot(&self, params: Parameters<ImportSnapshot>) -> McpResult {
        self.handlers().import_snapshot(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for DocketMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "docket".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: DocketMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Docket MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use docket_core::TrackerBuilder;
    use tempfile::TempDir;

    use super::*;

    fn server() -> (TempDir, DocketMcpServer) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let tracker = TrackerBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .expect("Failed to create tracker");
        (temp_dir, DocketMcpServer::new(tracker))
    }

    #[test]
    fn test_every_operation_is_a_tool() {
        let (_temp_dir, server) = server();
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "add_task",
                "autoclose_overdue_tasks",
                "change_task_status",
                "create_project",
                "delete_project",
                "delete_task",
                "edit_project",
                "edit_task",
                "export_snapshot",
                "import_snapshot",
                "list_overdue_tasks",
                "list_projects",
                "list_tasks",
                "show_project",
                "show_task",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_project_is_resource_not_found() {
        let (_temp_dir, server) = server();
        let params = Parameters(serde_json::from_value(serde_json::json!({ "id": 9 })).unwrap());
        let err = server.show_project(params).await.unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::RESOURCE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_then_list_projects() {
        let (_temp_dir, server) = server();
        let params = Parameters(
            serde_json::from_value(serde_json::json!({ "name": "Work", "description": null }))
                .unwrap(),
        );
        server.create_project(params).await.expect("create failed");

        let result = server.list_projects().await.expect("list failed");
        let body = serde_json::to_string(&result).expect("serialize failed");
        assert!(body.contains("Work"));
    }

    #[tokio::test]
    async fn test_import_snapshot_loads_exported_data() {
        let (_source_dir, source) = server();
        source
            .tracker
            .projects()
            .create("Work", None)
            .expect("create failed");
        let snapshot = source.tracker.export_snapshot().await.expect("export failed");
        let json = serde_json::to_string(&snapshot).expect("serialize failed");

        let (_target_dir, target) = server();
        let params = Parameters(
            serde_json::from_value(serde_json::json!({ "snapshot": json })).unwrap(),
        );
        target.import_snapshot(params).await.expect("import failed");

        let projects = target.tracker.projects().list().expect("list failed");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Work");
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_invalid_params() {
        let (_temp_dir, server) = server();
        let params = Parameters(
            serde_json::from_value(serde_json::json!({ "snapshot": "not json" })).unwrap(),
        );
        let err = server.import_snapshot(params).await.unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }
}
