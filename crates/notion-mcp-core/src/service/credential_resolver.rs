//! Credential Resolver
//!
//! Turns a [`CredentialSource`] into a [`BearerToken`], asking the Nango
//! broker when no static token was supplied. Resolution happens once at
//! startup and is never retried.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::{BearerToken, BrokerConfig, BrokerConnection, CredentialSource};
use crate::error::AuthError;

const BROKER_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolves the Notion bearer token
pub struct CredentialResolver {
    broker: Option<BrokerConfig>,
    http: reqwest::Client,
}

impl CredentialResolver {
    /// Create a resolver; `broker` is only consulted for broker credentials
    pub fn new(broker: Option<BrokerConfig>) -> Self {
        Self {
            broker,
            http: reqwest::Client::new(),
        }
    }

    /// `resolve(staticToken?, connectionId?, providerConfigKey?)`
    pub async fn resolve_token(
        &self,
        static_token: Option<&str>,
        connection_id: Option<&str>,
        provider_config_key: Option<&str>,
    ) -> Result<BearerToken, AuthError> {
        let source = CredentialSource::from_parts(static_token, connection_id, provider_config_key)?;
        self.resolve(&source).await
    }

    /// Produce a bearer token for the given source
    pub async fn resolve(&self, source: &CredentialSource) -> Result<BearerToken, AuthError> {
        match source {
            CredentialSource::StaticToken(token) => {
                debug!("Using static Notion API token");
                Ok(token.clone())
            }
            CredentialSource::Broker(connection) => self.fetch_from_broker(connection).await,
        }
    }

    async fn fetch_from_broker(
        &self,
        connection: &BrokerConnection,
    ) -> Result<BearerToken, AuthError> {
        let broker = self.broker.as_ref().ok_or(AuthError::BrokerNotConfigured)?;
        let url = broker.connection_url(&connection.connection_id);

        info!(
            connection_id = %connection.connection_id,
            provider_config_key = %connection.provider_config_key,
            "Fetching Notion credentials from Nango"
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(broker.secret_key.as_str())
            .query(&[
                ("provider_config_key", connection.provider_config_key.as_str()),
                ("refresh_token", "true"),
            ])
            .timeout(BROKER_TIMEOUT)
            .send()
            .await
            .map_err(|e| AuthError::BrokerRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Nango rejected credentials request");
            return Err(AuthError::BrokerStatus {
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AuthError::BrokerResponse(e.to_string()))?;

        let token = extract_access_token(&body).ok_or(AuthError::MissingAccessToken)?;
        info!("Obtained Notion access token from Nango");
        Ok(BearerToken::new(token))
    }
}

/// `credentials.access_token`, else top-level `access_token`
pub fn extract_access_token(body: &Value) -> Option<&str> {
    let nested = body
        .get("credentials")
        .and_then(|c| c.get("access_token"))
        .and_then(Value::as_str);
    let top_level = body.get("access_token").and_then(Value::as_str);

    nested
        .into_iter()
        .chain(top_level)
        .find(|token| !token.is_empty())
}
