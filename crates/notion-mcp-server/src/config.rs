//! Environment configuration

use std::path::PathBuf;
use std::time::Duration;

use notion_mcp_core::{
    AuthError, BearerToken, BrokerConfig, ClientConfig, CredentialSource, DEFAULT_NOTION_VERSION,
    DEFAULT_REQUEST_TIMEOUT,
};
use zeroize::Zeroizing;

use crate::error::ConfigError;

pub const ENV_NOTION_API_TOKEN: &str = "NOTION_API_TOKEN";
pub const ENV_NANGO_BASE_URL: &str = "NANGO_BASE_URL";
pub const ENV_NANGO_SECRET_KEY: &str = "NANGO_SECRET_KEY";
pub const ENV_NANGO_CONNECTION_ID: &str = "NANGO_CONNECTION_ID";
pub const ENV_NANGO_INTEGRATION_ID: &str = "NANGO_INTEGRATION_ID";
pub const ENV_NOTION_VERSION: &str = "NOTION_VERSION";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "NOTION_REQUEST_TIMEOUT_SECS";
pub const ENV_LOG_DIR: &str = "NOTION_MCP_LOG_DIR";

/// Process configuration read once at startup
pub struct ServerConfig {
    pub notion_token: Option<Zeroizing<String>>,
    pub nango_base_url: Option<String>,
    pub nango_secret_key: Option<Zeroizing<String>>,
    pub nango_connection_id: Option<String>,
    pub nango_integration_id: Option<String>,
    pub notion_version: String,
    pub request_timeout: Duration,
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let request_timeout = match get(ENV_REQUEST_TIMEOUT_SECS) {
            None => DEFAULT_REQUEST_TIMEOUT,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: ENV_REQUEST_TIMEOUT_SECS,
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            notion_token: get(ENV_NOTION_API_TOKEN).map(Zeroizing::new),
            nango_base_url: get(ENV_NANGO_BASE_URL),
            nango_secret_key: get(ENV_NANGO_SECRET_KEY).map(Zeroizing::new),
            nango_connection_id: get(ENV_NANGO_CONNECTION_ID),
            nango_integration_id: get(ENV_NANGO_INTEGRATION_ID),
            notion_version: get(ENV_NOTION_VERSION)
                .unwrap_or_else(|| DEFAULT_NOTION_VERSION.to_string()),
            request_timeout,
            log_dir: get(ENV_LOG_DIR).map(|dir| expand_home(&dir)),
        })
    }

    /// Where the bearer token comes from
    pub fn credential_source(&self) -> Result<CredentialSource, AuthError> {
        CredentialSource::from_parts(
            self.notion_token.as_deref().map(String::as_str),
            self.nango_connection_id.as_deref(),
            self.nango_integration_id.as_deref(),
        )
    }

    /// Broker settings, when both the URL and the secret are present
    pub fn broker_config(&self) -> Option<BrokerConfig> {
        BrokerConfig::from_parts(
            self.nango_base_url.as_deref(),
            self.nango_secret_key.as_deref().map(String::as_str),
        )
    }

    /// Client configuration for a resolved token
    pub fn client_config(&self, token: BearerToken) -> ClientConfig {
        ClientConfig::new(token)
            .with_notion_version(self.notion_version.clone())
            .with_timeout(self.request_timeout)
    }
}

/// `~/logs` → `$HOME/logs`
fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
