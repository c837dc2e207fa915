//! HTTP client for the Notion REST API.
//!
//! Each operation is a thin shape-mapper over [`NotionClient::request`],
//! which owns headers, retries and error classification. The client holds
//! only immutable configuration and is shared across concurrent tool calls
//! without locking.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use super::retry::{AttemptOutcome, RetryState};
use crate::domain::{
    AppendChildren, ClientConfig, CreateDatabase, CreatePage, DatabaseQuery, PageUpdate,
    Pagination, SearchQuery,
};
use crate::error::{ApiError, ApiResult};

/// Header carrying the API version
pub const NOTION_VERSION_HEADER: &str = "Notion-Version";

/// Supported Notion operations
///
/// Implemented by [`NotionClient`]; the dispatcher depends on this trait so
/// that tests can substitute a recording fake.
#[async_trait]
pub trait NotionApi: Send + Sync {
    async fn get_database(&self, database_id: &str) -> ApiResult<Value>;

    async fn query_database(&self, database_id: &str, query: &DatabaseQuery) -> ApiResult<Value>;

    async fn create_database(&self, request: &CreateDatabase) -> ApiResult<Value>;

    async fn get_page(&self, page_id: &str) -> ApiResult<Value>;

    async fn create_page(&self, request: &CreatePage) -> ApiResult<Value>;

    async fn update_page(&self, page_id: &str, update: &PageUpdate) -> ApiResult<Value>;

    async fn get_block_children(&self, block_id: &str, pagination: &Pagination)
        -> ApiResult<Value>;

    async fn append_block_children(&self, block_id: &str, children: &[Value]) -> ApiResult<Value>;

    async fn search(&self, search: &SearchQuery) -> ApiResult<Value>;

    async fn get_current_user(&self) -> ApiResult<Value>;
}

/// Authenticated Notion API client
#[derive(Debug, Clone)]
pub struct NotionClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl NotionClient {
    /// Build the client and its default headers
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&config.token.authorization_header())
            .map_err(|_| ApiError::Configuration("token is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        headers.insert(
            NOTION_VERSION_HEADER,
            HeaderValue::from_str(&config.notion_version).map_err(|_| {
                ApiError::Configuration(format!(
                    "invalid Notion-Version '{}'",
                    config.notion_version
                ))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(concat!("notion-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request, retrying per the configured [`RetryPolicy`](super::retry::RetryPolicy)
    ///
    /// Returns the parsed JSON body, or an empty object for an empty body.
    #[instrument(skip_all, fields(method = %method, path = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: Option<&[(&str, String)]>,
    ) -> ApiResult<Value> {
        let url = self.config.endpoint_url(path);
        let policy = &self.config.retry;
        let mut state = RetryState::start();

        loop {
            state = match state {
                RetryState::Attempting { attempt } => {
                    debug!(attempt, "Sending Notion API request");
                    let outcome = self.attempt(method.clone(), &url, body, query).await;
                    policy.on_outcome(attempt, outcome)
                }
                RetryState::BackoffForRateLimit { attempt, wait } => {
                    warn!(
                        attempt,
                        wait_ms = wait.as_millis() as u64,
                        "Rate limited by Notion, backing off"
                    );
                    sleep(wait).await;
                    policy.after_backoff(RetryState::BackoffForRateLimit { attempt, wait })
                }
                RetryState::BackoffForTransientError {
                    attempt,
                    wait,
                    error,
                } => {
                    warn!(
                        attempt,
                        wait_ms = wait.as_millis() as u64,
                        error = %error,
                        "Notion API request failed, retrying"
                    );
                    sleep(wait).await;
                    policy.after_backoff(RetryState::BackoffForTransientError {
                        attempt,
                        wait,
                        error,
                    })
                }
                RetryState::Succeeded(value) => return Ok(value),
                RetryState::Exhausted(err) => {
                    warn!(error = %err, "Notion API request failed");
                    return Err(err);
                }
            };
        }
    }

    /// One HTTP round trip, classified for the retry state machine
    async fn attempt(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        query: Option<&[(&str, String)]>,
    ) -> AttemptOutcome<Value> {
        let mut request = self.http.request(method, url);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return AttemptOutcome::Transient(e.to_string()),
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            return AttemptOutcome::RateLimited { retry_after };
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return AttemptOutcome::Transient(e.to_string()),
        };

        if !status.is_success() {
            return AttemptOutcome::Fatal(status_error(status, &bytes));
        }

        match parse_body(&bytes) {
            Ok(value) => AttemptOutcome::Success(value),
            Err(err) => AttemptOutcome::Fatal(err),
        }
    }

    fn to_body<T: serde::Serialize>(value: &T) -> ApiResult<Value> {
        serde_json::to_value(value).map_err(|e| ApiError::Configuration(e.to_string()))
    }
}

/// Empty body → `{}`; otherwise JSON
fn parse_body(bytes: &[u8]) -> ApiResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Build a status error, preferring Notion's `{code, message}` error object
fn status_error(status: StatusCode, bytes: &[u8]) -> ApiError {
    let parsed: Option<Value> = serde_json::from_slice(bytes).ok();
    let code = parsed
        .as_ref()
        .and_then(|v| v.get("code"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            let raw = String::from_utf8_lossy(bytes);
            if raw.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                raw.into_owned()
            }
        });

    ApiError::Status {
        status: status.as_u16(),
        code,
        message,
    }
}

fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}

#[async_trait]
impl NotionApi for NotionClient {
    async fn get_database(&self, database_id: &str) -> ApiResult<Value> {
        self.request(
            Method::GET,
            &format!("databases/{}", segment(database_id)),
            None,
            None,
        )
        .await
    }

    async fn query_database(&self, database_id: &str, query: &DatabaseQuery) -> ApiResult<Value> {
        let body = Self::to_body(&query.normalized())?;
        self.request(
            Method::POST,
            &format!("databases/{}/query", segment(database_id)),
            Some(&body),
            None,
        )
        .await
    }

    async fn create_database(&self, request: &CreateDatabase) -> ApiResult<Value> {
        let body = Self::to_body(request)?;
        self.request(Method::POST, "databases", Some(&body), None)
            .await
    }

    async fn get_page(&self, page_id: &str) -> ApiResult<Value> {
        self.request(Method::GET, &format!("pages/{}", segment(page_id)), None, None)
            .await
    }

    async fn create_page(&self, request: &CreatePage) -> ApiResult<Value> {
        let body = Self::to_body(request)?;
        self.request(Method::POST, "pages", Some(&body), None).await
    }

    async fn update_page(&self, page_id: &str, update: &PageUpdate) -> ApiResult<Value> {
        let body = Self::to_body(update)?;
        self.request(
            Method::PATCH,
            &format!("pages/{}", segment(page_id)),
            Some(&body),
            None,
        )
        .await
    }

    async fn get_block_children(
        &self,
        block_id: &str,
        pagination: &Pagination,
    ) -> ApiResult<Value> {
        let query = pagination.to_query();
        self.request(
            Method::GET,
            &format!("blocks/{}/children", segment(block_id)),
            None,
            Some(&query),
        )
        .await
    }

    async fn append_block_children(&self, block_id: &str, children: &[Value]) -> ApiResult<Value> {
        let body = Self::to_body(&AppendChildren { children })?;
        self.request(
            Method::PATCH,
            &format!("blocks/{}/children", segment(block_id)),
            Some(&body),
            None,
        )
        .await
    }

    async fn search(&self, search: &SearchQuery) -> ApiResult<Value> {
        let body = Self::to_body(&search.normalized())?;
        self.request(Method::POST, "search", Some(&body), None).await
    }

    async fn get_current_user(&self) -> ApiResult<Value> {
        self.request(Method::GET, "users/me", None, None).await
    }
}
