//! Dispatcher wired to the real client and a mock Notion server

use std::sync::Arc;

use notion_mcp_server::Dispatcher;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tests::fixtures::{notion_client, sample_list, sample_page};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dispatcher(server: &MockServer) -> Dispatcher {
    Dispatcher::new(Arc::new(notion_client(server)))
}

#[tokio::test]
async fn test_get_page_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pages/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page("p1")))
        .expect(1)
        .mount(&server)
        .await;

    let output = dispatcher(&server)
        .call_tool("notion_get_page", json!({"page_id": "p1"}).as_object().cloned())
        .await;

    assert!(!output.is_error, "{}", output.text);
    let parsed: Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(parsed, sample_page("p1"));
}

#[tokio::test]
async fn test_create_page_sends_database_parent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pages"))
        .and(body_json(json!({
            "parent": {"type": "database_id", "database_id": "X"},
            "properties": {"Name": {"title": [{"text": {"content": "A"}}]}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page("new")))
        .expect(1)
        .mount(&server)
        .await;

    let output = dispatcher(&server)
        .call_tool(
            "notion_create_page",
            json!({
                "parent_type": "database",
                "parent_id": "X",
                "properties": {"Name": {"title": [{"text": {"content": "A"}}]}}
            })
            .as_object()
            .cloned(),
        )
        .await;

    assert!(!output.is_error, "{}", output.text);
}

#[tokio::test]
async fn test_block_children_page_size_reaches_server_clamped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blocks/b1/children"))
        .and(query_param("page_size", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_list(vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let output = dispatcher(&server)
        .call_tool(
            "notion_get_block_children",
            json!({"block_id": "b1", "page_size": 250}).as_object().cloned(),
        )
        .await;

    assert!(!output.is_error, "{}", output.text);
}

#[tokio::test]
async fn test_persistent_rate_limit_becomes_error_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let output = dispatcher(&server)
        .call_tool("notion_search", None)
        .await;

    assert!(output.is_error);
    assert!(output.text.starts_with("Error executing notion_search: "));
    assert!(output.text.contains("rate limit"));
}
