//! Notion MCP Handler
//!
//! Implements the MCP ServerHandler trait over the tool dispatcher. Tool
//! failures are reported as error tool results, never as protocol errors.

use std::sync::Arc;

use rmcp::{
    model::*, service::RequestContext, ErrorData as McpError, RoleServer, ServerHandler,
};
use tracing::{debug, info};

use crate::tools::{Dispatcher, ToolDescriptor};

/// Name advertised during initialization
pub const SERVER_NAME: &str = "notion-mcp-server";

#[derive(Clone)]
pub struct NotionMcpHandler {
    dispatcher: Dispatcher,
    tools: Arc<Vec<Tool>>,
}

impl NotionMcpHandler {
    pub fn new(dispatcher: Dispatcher) -> Self {
        let tools = dispatcher.list_tools().iter().map(to_mcp_tool).collect();
        Self {
            dispatcher,
            tools: Arc::new(tools),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

fn to_mcp_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.name.as_str(),
        descriptor.description,
        Arc::new(descriptor.input_schema.clone()),
    )
}

impl ServerHandler for NotionMcpHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder()
                .enable_tools_with(ToolsCapability {
                    list_changed: Some(false),
                })
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Read and write a Notion workspace: search, databases (get, query, create), \
                 pages (get, create, update), block children (list, append) and the \
                 integration user."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _params: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        debug!(count = self.tools.len(), "list_tools");
        Ok(ListToolsResult::with_all_items(self.tools.as_ref().clone()))
    }

    async fn call_tool(
        &self,
        params: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = %params.name, "call_tool");

        let output = self
            .dispatcher
            .call_tool(&params.name, params.arguments)
            .await;

        let content = vec![Content::text(output.text)];
        Ok(if output.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        })
    }
}
