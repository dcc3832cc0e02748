//! MCP tool handlers implementation

use docket_core::{
    params as core, CreateResult, DeleteResult, Snapshot, SqliteStore, Tracker, TrackerError,
    UpdateResult,
};
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::to_mcp_error;

// Core parameter types stay free of MCP concerns. The wrapper below adds
// deserialization and schema generation by delegating to the wrapped type.

/// Generic MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateProject = McpParams<core::CreateProject>;
pub type EditProject = McpParams<core::EditProject>;
pub type AddTask = McpParams<core::AddTask>;
pub type EditTask = McpParams<core::EditTask>;
pub type ChangeStatus = McpParams<core::ChangeStatus>;
pub type Autoclose = McpParams<core::Autoclose>;
pub type ImportSnapshot = McpParams<core::ImportSnapshot>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(body.into())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    tracker: Tracker<SqliteStore>,
}

impl McpHandlers {
    pub fn new(tracker: Tracker<SqliteStore>) -> Self {
        Self { tracker }
    }

    pub async fn create_project(
        &self,
        Parameters(params): Parameters<CreateProject>,
    ) -> McpResult {
        debug!("create_project: {params:?}");
        let project = self
            .tracker
            .create_project(params.as_ref())
            .await
            .map_err(|e| to_mcp_error(&e))?;
        text(CreateResult::new(project).to_string())
    }

    pub async fn list_projects(&self) -> McpResult {
        debug!("list_projects");
        let projects = self
            .tracker
            .list_projects()
            .await
            .map_err(|e| to_mcp_error(&e))?;
        text(projects.to_string())
    }

    pub async fn show_project(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_project: {params:?}");
        let id = params.as_ref().id;
        let project = self
            .tracker
            .get_project(params.as_ref())
            .await
            .map_err(|e| to_mcp_error(&e))?
            .ok_or_else(|| to_mcp_error(&TrackerError::ProjectNotFound { id }))?;
        text(project.to_string())
    }

    pub async fn edit_project(&self, Parameters(params): Parameters<EditProject>) -> McpResult {
        debug!("edit_project: {params:?}");
        let project = self
            .tracker
            .edit_project(params.as_ref())
            .await
            .map_err(|e| to_mcp_error(&e))?;
        text(UpdateResult::new(project).to_string())
    }

    pub async fn delete_project(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_project: {params:?}");
        let project = self
            .tracker
            .delete_project(params.as_ref())
            .await
            .map_err(|e| to_mcp_error(&e))?;
        text(DeleteResult::new(project).to_string())
    }

    pub async fn add_task(&self, Parameters(params): Parameters<AddTask>) -> McpResult {
        debug!("add_task: {params:?}");
        let task = self
            .tracker
            .add_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error(&e))?;
        text(CreateResult::new(task).to_string())
    }

    pub async fn list_tasks(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("list_tasks: {params:?}");
        let tasks = self
            .tracker
            .list_tasks_by_project(params.as_ref())
            .await
            .map_err(|e| to_mcp_error(&e))?;
        text(tasks.to_string())
    }

    pub async fn show_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_task: {params:?}");
        let id = params.as_ref().id;
        let task = self
            .tracker
            .get_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error(&e))?
            .ok_or_else(|| to_mcp_error(&TrackerError::TaskNotFound { id }))?;
        text(task.to_string())
    }

    pub async fn edit_task(&self, Parameters(params): Parameters<EditTask>) -> McpResult {
        debug!("edit_task: {params:?}");
        let task = self
            .tracker
            .edit_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error(&e))?;
        text(UpdateResult::new(task).to_string())
    }

    pub async fn change_task_status(
        &self,
        Parameters(params): Parameters<ChangeStatus>,
    ) -> McpResult {
        debug!("change_task_status: {params:?}");
        let task = self
            .tracker
            .change_task_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error(&e))?;
        text(UpdateResult::new(task).to_string())
    }

    pub async fn delete_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_task: {params:?}");
        let task = self
            .tracker
            .delete_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error(&e))?;
        text(DeleteResult::new(task).to_string())
    }

    pub async fn list_overdue_tasks(&self) -> McpResult {
        debug!("list_overdue_tasks");
        let tasks = self
            .tracker
            .list_overdue_tasks()
            .await
            .map_err(|e| to_mcp_error(&e))?;
        text(tasks.to_string())
    }

    pub async fn autoclose_overdue_tasks(
        &self,
        Parameters(params): Parameters<Autoclose>,
    ) -> McpResult {
        debug!("autoclose_overdue_tasks: {params:?}");
        let result = self
            .tracker
            .autoclose_overdue_tasks(params.as_ref())
            .await
            .map_err(|e| to_mcp_error(&e))?;
        text(result.to_string())
    }

    pub async fn export_snapshot(&self) -> McpResult {
        debug!("export_snapshot");
        let snapshot = self
            .tracker
            .export_snapshot()
            .await
            .map_err(|e| to_mcp_error(&e))?;
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| to_mcp_error(&TrackerError::from(e)))?;
        text(json)
    }

    pub async fn import_snapshot(
        &self,
        Parameters(params): Parameters<ImportSnapshot>,
    ) -> McpResult {
        debug!("import_snapshot: {} bytes", params.as_ref().snapshot.len());
        let snapshot: Snapshot = serde_json::from_str(&params.as_ref().snapshot)
            .map_err(|e| ErrorData::invalid_params(format!("Invalid snapshot: {e}"), None))?;
        let result = self
            .tracker
            .import_snapshot(snapshot)
            .await
            .map_err(|e| to_mcp_error(&e))?;
        text(result.to_string())
    }
}
