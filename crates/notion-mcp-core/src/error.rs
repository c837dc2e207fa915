//! Error types for credential resolution and Notion API calls.

use thiserror::Error;

/// Credential resolution failure.
///
/// Raised only while bootstrapping; the process cannot serve tool calls
/// without a bearer token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Neither a static token nor a complete broker pair was supplied
    #[error(
        "either a Notion API token or both a Nango connection id and provider config key must be provided"
    )]
    MissingCredentials,

    /// Broker identifiers were supplied but the broker itself is not configured
    #[error("NANGO_BASE_URL and NANGO_SECRET_KEY environment variables must be set")]
    BrokerNotConfigured,

    /// The broker could not be reached
    #[error("failed to get credentials from Nango: {0}")]
    BrokerRequest(String),

    /// The broker answered with a non-success status
    #[error("failed to get credentials from Nango: HTTP {status}")]
    BrokerStatus { status: u16 },

    /// The broker answered with something other than JSON
    #[error("failed to parse Nango credentials response: {0}")]
    BrokerResponse(String),

    /// The broker response carried no access token
    #[error("no access token found in Nango credentials response")]
    MissingAccessToken,
}

/// Failed Notion API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success status other than 429; never retried
    #[error("Notion API returned HTTP {status}: {message}")]
    Status {
        status: u16,
        /// Notion error code (e.g. `object_not_found`) when the body carried one
        code: Option<String>,
        message: String,
    },

    /// Every attempt in the budget was answered with 429
    #[error("Notion API rate limit persisted after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// Connection failure, timeout or body read failure on the last attempt
    #[error("API request failed after {attempts} attempts: {message}")]
    Transport { attempts: u32, message: String },

    /// 2xx response whose body is not JSON
    #[error("failed to decode Notion API response: {0}")]
    Decode(String),

    /// The HTTP client could not be built from the supplied configuration
    #[error("invalid Notion client configuration: {0}")]
    Configuration(String),
}

impl ApiError {
    /// HTTP status associated with the failure, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

/// Result alias for Notion API calls
pub type ApiResult<T> = Result<T, ApiError>;
