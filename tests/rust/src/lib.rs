//! Shared test utilities and fixtures for Notion MCP integration tests.

pub use mocks::{RecordedCall, RecordingNotionApi};

/// Clients, policies and canned Notion payloads
pub mod fixtures {
    use std::time::Duration;

    use notion_mcp_core::{BearerToken, ClientConfig, NotionClient, RetryPolicy};
    use serde_json::{json, Value};
    use wiremock::MockServer;

    /// Token every test client authenticates with
    pub const TEST_TOKEN: &str = "secret_test_token";

    /// Retry policy with millisecond backoffs so tests stay fast
    pub fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            transient_backoff: Duration::from_millis(10),
            default_rate_limit_backoff: Duration::from_millis(10),
            max_rate_limit_backoff: Duration::from_secs(5),
        }
    }

    /// Client configuration pointed at a mock server
    pub fn client_config(server: &MockServer) -> ClientConfig {
        ClientConfig::new(BearerToken::new(TEST_TOKEN))
            .with_base_url(server.uri())
            .with_retry(fast_retry())
            .with_timeout(Duration::from_secs(2))
    }

    /// Notion client pointed at a mock server
    pub fn notion_client(server: &MockServer) -> NotionClient {
        NotionClient::new(client_config(server)).expect("client should build")
    }

    pub fn sample_user() -> Value {
        json!({
            "object": "user",
            "id": "6794760a-1f15-45cd-9c65-0dfe42f5135a",
            "type": "bot",
            "name": "Notion MCP",
            "bot": {"owner": {"type": "workspace", "workspace": true}}
        })
    }

    pub fn sample_page(id: &str) -> Value {
        json!({
            "object": "page",
            "id": id,
            "archived": false,
            "properties": {
                "Name": {"id": "title", "type": "title", "title": []}
            }
        })
    }

    pub fn sample_list(results: Vec<Value>) -> Value {
        json!({
            "object": "list",
            "results": results,
            "next_cursor": null,
            "has_more": false
        })
    }
}
