//! # Notion MCP Core Library
//!
//! Credential resolution and the Notion REST API client used by the MCP server.
//!
//! ## Modules
//!
//! - `domain` - Credentials, client configuration and request shapes
//! - `service` - Credential resolver, API client, retry state machine
//! - `error` - `AuthError` and `ApiError`

pub mod domain;
pub mod error;
pub mod service;

// Re-export commonly used types
pub use domain::*;
pub use error::{ApiError, ApiResult, AuthError};
pub use service::*;
