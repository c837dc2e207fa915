//! Server-side error types

use notion_mcp_core::ApiError;
use thiserror::Error;

/// Errors raised while dispatching a tool call
///
/// These never escape the dispatcher; each one is rendered into the text
/// payload of an error tool result.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Notion client not initialized")]
    NotInitialized,

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DispatchError {
    /// Text returned to the MCP client for a failed call of `tool`
    pub fn to_output_text(&self, tool: &str) -> String {
        match self {
            DispatchError::NotInitialized => "Error: Notion client not initialized".to_string(),
            DispatchError::UnknownTool(name) => format!("Unknown tool: {}", name),
            other => format!("Error executing {}: {}", tool, other),
        }
    }
}

/// Invalid environment configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive number of seconds, got '{value}'")]
    InvalidTimeout { name: &'static str, value: String },
}
