//! Tool dispatcher
//!
//! Routes a tool name and its JSON arguments to the matching Notion
//! operation and renders the outcome as text. Every failure becomes an error
//! result; nothing propagates to the caller.

use std::sync::Arc;

use notion_mcp_core::{
    ApiResult, CreateDatabase, CreatePage, DatabaseQuery, NotionApi, PageUpdate, Pagination,
    SearchQuery,
};
use serde_json::{Map, Value};
use tracing::{debug, error, instrument, warn};

use super::args::ToolCall;
use super::registry::{tool_descriptors, ToolDescriptor};
use super::ToolName;
use crate::error::DispatchError;

/// Text payload of a tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Routes tool calls to a Notion API implementation
#[derive(Clone)]
pub struct Dispatcher {
    client: Option<Arc<dyn NotionApi>>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn NotionApi>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A dispatcher whose client was never set up; every call fails
    pub fn uninitialized() -> Self {
        Self { client: None }
    }

    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    pub fn list_tools(&self) -> &'static [ToolDescriptor] {
        tool_descriptors()
    }

    /// Execute `name` and render the result
    #[instrument(skip_all, fields(tool = %name))]
    pub async fn call_tool(&self, name: &str, arguments: Option<Map<String, Value>>) -> ToolOutput {
        match self.try_call(name, arguments).await {
            Ok(text) => ToolOutput::success(text),
            Err(err) => {
                match &err {
                    DispatchError::NotInitialized => warn!("Tool called before client setup"),
                    DispatchError::UnknownTool(_) => warn!("Unknown tool requested"),
                    other => error!(error = %other, "Tool execution failed"),
                }
                ToolOutput::error(err.to_output_text(name))
            }
        }
    }

    /// Execute `name`, returning the pretty-printed JSON result
    pub async fn try_call(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<String, DispatchError> {
        let client = self.client.as_deref().ok_or(DispatchError::NotInitialized)?;
        let tool: ToolName = name
            .parse()
            .map_err(|_| DispatchError::UnknownTool(name.to_string()))?;

        let call = ToolCall::decode(tool, arguments)?;
        debug!("Dispatching tool call");
        let result = execute(client, &call).await?;

        Ok(serde_json::to_string_pretty(&result)?)
    }
}

async fn execute(client: &dyn NotionApi, call: &ToolCall) -> ApiResult<Value> {
    match call {
        ToolCall::Search(args) => client.search(&SearchQuery::from(args)).await,
        ToolCall::GetDatabase(args) => client.get_database(&args.database_id).await,
        ToolCall::QueryDatabase(args) => {
            client
                .query_database(&args.database_id, &DatabaseQuery::from(args))
                .await
        }
        ToolCall::CreateDatabase(args) => client.create_database(&CreateDatabase::from(args)).await,
        ToolCall::GetPage(args) => client.get_page(&args.page_id).await,
        ToolCall::CreatePage(args) => client.create_page(&CreatePage::from(args)).await,
        ToolCall::UpdatePage(args) => {
            client
                .update_page(&args.page_id, &PageUpdate::from(args))
                .await
        }
        ToolCall::GetBlockChildren(args) => {
            client
                .get_block_children(&args.block_id, &Pagination::from(args))
                .await
        }
        ToolCall::AppendBlocks(args) => {
            client
                .append_block_children(&args.block_id, &args.children)
                .await
        }
        ToolCall::GetCurrentUser => client.get_current_user().await,
    }
}
