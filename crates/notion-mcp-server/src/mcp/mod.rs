//! MCP protocol surface

mod handler;

pub use handler::{NotionMcpHandler, SERVER_NAME};
