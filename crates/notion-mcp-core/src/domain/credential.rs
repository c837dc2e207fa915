//! Credential entities - where the Notion bearer token comes from
//!
//! A token is either supplied directly or fetched once from the Nango
//! credential broker. Secrets live in zeroizing buffers and are redacted
//! from `Debug` output.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::AuthError;

/// Resolved bearer token presented to the Notion API
#[derive(Clone)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    /// Raw token value (never log this)
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// `Authorization` header value
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Connection stored in the broker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerConnection {
    /// Nango connection id
    pub connection_id: String,
    /// Nango provider config key (integration id)
    pub provider_config_key: String,
}

/// How the bearer token is obtained
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Token supplied directly
    StaticToken(BearerToken),
    /// Token fetched from the broker
    Broker(BrokerConnection),
}

impl CredentialSource {
    /// Pick a credential source from optional inputs.
    ///
    /// A static token wins over a broker pair. Empty strings count as absent.
    /// Fails without touching the network when neither form is complete.
    pub fn from_parts(
        static_token: Option<&str>,
        connection_id: Option<&str>,
        provider_config_key: Option<&str>,
    ) -> Result<Self, AuthError> {
        if let Some(token) = non_empty(static_token) {
            return Ok(CredentialSource::StaticToken(BearerToken::new(token)));
        }

        match (non_empty(connection_id), non_empty(provider_config_key)) {
            (Some(connection_id), Some(provider_config_key)) => {
                Ok(CredentialSource::Broker(BrokerConnection {
                    connection_id: connection_id.to_string(),
                    provider_config_key: provider_config_key.to_string(),
                }))
            }
            _ => Err(AuthError::MissingCredentials),
        }
    }

    pub fn is_broker(&self) -> bool {
        matches!(self, CredentialSource::Broker(_))
    }
}

/// Nango endpoint and secret
#[derive(Clone)]
pub struct BrokerConfig {
    pub base_url: String,
    pub secret_key: Zeroizing<String>,
}

impl BrokerConfig {
    pub fn new(base_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            secret_key: Zeroizing::new(secret_key.into()),
        }
    }

    /// Build from optional parts; both must be present and non-empty
    pub fn from_parts(base_url: Option<&str>, secret_key: Option<&str>) -> Option<Self> {
        Some(Self::new(non_empty(base_url)?, non_empty(secret_key)?))
    }

    /// `{base}/connection/{id}` with the id percent-encoded
    pub fn connection_url(&self, connection_id: &str) -> String {
        format!(
            "{}/connection/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(connection_id)
        )
    }
}

impl fmt::Debug for BrokerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerConfig")
            .field("base_url", &self.base_url)
            .field("secret_key", &"***")
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
