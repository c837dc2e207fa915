//! Notion MCP server
//!
//! Exposes Notion workspace operations as MCP tools over stdio:
//! - `tools`: tool registry, typed arguments and the dispatcher
//! - `mcp`: the rmcp `ServerHandler`
//! - `config` / `logging`: process bootstrap

pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod tools;

pub use config::ServerConfig;
pub use error::{ConfigError, DispatchError};
pub use mcp::{NotionMcpHandler, SERVER_NAME};
pub use tools::{Dispatcher, ToolCall, ToolDescriptor, ToolName, ToolOutput};
