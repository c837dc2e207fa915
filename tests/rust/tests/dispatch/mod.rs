//! Tool dispatch tests
//!
//! Most tests run the dispatcher against a recording API; the end-to-end
//! section goes through the real client and a mock Notion server.

mod end_to_end;

use std::sync::Arc;

use notion_mcp_server::{Dispatcher, ToolName};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use tests::fixtures::{sample_page, sample_user};
use tests::{RecordedCall, RecordingNotionApi};

fn args(value: Value) -> Option<Map<String, Value>> {
    value.as_object().cloned()
}

/// Minimal valid arguments for every tool
fn valid_arguments(tool: ToolName) -> Value {
    match tool {
        ToolName::Search => json!({"query": "roadmap"}),
        ToolName::GetDatabase => json!({"database_id": "db1"}),
        ToolName::QueryDatabase => json!({"database_id": "db1"}),
        ToolName::CreateDatabase => {
            json!({"parent_page_id": "p1", "title": "Tasks", "properties": {"Name": {"title": {}}}})
        }
        ToolName::GetPage => json!({"page_id": "p1"}),
        ToolName::CreatePage => {
            json!({"parent_type": "page", "parent_id": "p1", "properties": {}})
        }
        ToolName::UpdatePage => json!({"page_id": "p1", "properties": {}}),
        ToolName::GetBlockChildren => json!({"block_id": "b1"}),
        ToolName::AppendBlocks => json!({"block_id": "b1", "children": []}),
        ToolName::GetCurrentUser => json!({}),
    }
}

fn dispatcher_with(api: RecordingNotionApi) -> (Dispatcher, Arc<RecordingNotionApi>) {
    let api = Arc::new(api);
    (Dispatcher::new(api.clone()), api)
}

// =============================================================================
// Results
// =============================================================================

#[tokio::test]
async fn test_every_tool_returns_api_result_as_json() {
    let (dispatcher, api) = dispatcher_with(RecordingNotionApi::new().with_response(sample_page("p1")));

    for tool in ToolName::ALL {
        let output = dispatcher
            .call_tool(tool.as_str(), args(valid_arguments(tool)))
            .await;
        assert!(!output.is_error, "{}: {}", tool, output.text);

        let parsed: Value = serde_json::from_str(&output.text).unwrap();
        assert_eq!(&parsed, api.response(), "{}", tool);
    }
    assert_eq!(api.calls().len(), 10);
}

#[tokio::test]
async fn test_result_is_indented_two_spaces() {
    let (dispatcher, _) = dispatcher_with(RecordingNotionApi::new().with_response(sample_user()));
    let output = dispatcher.call_tool("notion_get_current_user", None).await;
    assert_eq!(
        output.text,
        serde_json::to_string_pretty(&sample_user()).unwrap()
    );
    assert!(output.text.contains("\n  \"object\": \"user\""));
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_missing_required_argument_names_the_tool() {
    let (dispatcher, api) = dispatcher_with(RecordingNotionApi::new());
    let tools_with_required = [
        ToolName::GetDatabase,
        ToolName::QueryDatabase,
        ToolName::CreateDatabase,
        ToolName::GetPage,
        ToolName::CreatePage,
        ToolName::UpdatePage,
        ToolName::GetBlockChildren,
        ToolName::AppendBlocks,
    ];

    for tool in tools_with_required {
        let output = dispatcher.call_tool(tool.as_str(), args(json!({}))).await;
        assert!(output.is_error, "{}", tool);
        assert!(
            output
                .text
                .starts_with(&format!("Error executing {}: ", tool.as_str())),
            "{}",
            output.text
        );
    }
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_tool_makes_no_api_call() {
    let (dispatcher, api) = dispatcher_with(RecordingNotionApi::new());
    let output = dispatcher
        .call_tool("notion_delete_database", args(json!({"database_id": "db1"})))
        .await;

    assert!(output.is_error);
    assert_eq!(output.text, "Unknown tool: notion_delete_database");
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_uninitialized_client() {
    let dispatcher = Dispatcher::uninitialized();
    let output = dispatcher
        .call_tool("notion_get_page", args(json!({"page_id": "p1"})))
        .await;
    assert!(output.is_error);
    assert_eq!(output.text, "Error: Notion client not initialized");
}

#[tokio::test]
async fn test_api_failure_becomes_error_text() {
    let (dispatcher, _) =
        dispatcher_with(RecordingNotionApi::new().with_failure(400, "body failed validation"));
    let output = dispatcher
        .call_tool("notion_update_page", args(json!({"page_id": "p1", "properties": {}})))
        .await;

    assert!(output.is_error);
    assert!(output
        .text
        .starts_with("Error executing notion_update_page: "));
    assert!(output.text.contains("body failed validation"));
}

// =============================================================================
// Argument translation
// =============================================================================

#[tokio::test]
async fn test_create_page_database_parent() {
    let (dispatcher, api) = dispatcher_with(RecordingNotionApi::new());
    dispatcher
        .call_tool(
            "notion_create_page",
            args(json!({
                "parent_type": "database",
                "parent_id": "X",
                "properties": {"Name": {"title": []}},
                "children": [{"type": "divider", "divider": {}}]
            })),
        )
        .await;

    let call = api.last_call().unwrap();
    assert_eq!(call.operation, "create_page");
    assert_eq!(
        call.payload["parent"],
        json!({"type": "database_id", "database_id": "X"})
    );
    assert_eq!(call.payload["children"], json!([{"type": "divider", "divider": {}}]));
}

#[tokio::test]
async fn test_search_filter_type() {
    let (dispatcher, api) = dispatcher_with(RecordingNotionApi::new());
    dispatcher
        .call_tool(
            "notion_search",
            args(json!({"filter_type": "page", "start_cursor": "c9"})),
        )
        .await;

    assert_eq!(
        api.last_call().unwrap(),
        RecordedCall {
            operation: "search",
            id: None,
            payload: json!({
                "filter": {"property": "object", "value": "page"},
                "start_cursor": "c9"
            }),
        }
    );
}

#[tokio::test]
async fn test_page_size_is_clamped_for_every_paged_tool() {
    let (dispatcher, api) = dispatcher_with(RecordingNotionApi::new());

    dispatcher
        .call_tool("notion_search", args(json!({"page_size": 101})))
        .await;
    dispatcher
        .call_tool(
            "notion_query_database",
            args(json!({"database_id": "db1", "page_size": 500})),
        )
        .await;
    dispatcher
        .call_tool(
            "notion_get_block_children",
            args(json!({"block_id": "b1", "page_size": 1000})),
        )
        .await;

    let calls = api.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].payload, json!({"page_size": 100}));
    assert_eq!(calls[1].payload, json!({"page_size": 100}));
    assert_eq!(calls[2].payload, json!({"page_size": "100"}));
}

#[tokio::test]
async fn test_create_database_title_and_parent() {
    let (dispatcher, api) = dispatcher_with(RecordingNotionApi::new());
    dispatcher
        .call_tool(
            "notion_create_database",
            args(valid_arguments(ToolName::CreateDatabase)),
        )
        .await;

    assert_eq!(
        api.last_call().unwrap().payload,
        json!({
            "parent": {"type": "page_id", "page_id": "p1"},
            "title": [{"type": "text", "text": {"content": "Tasks"}}],
            "properties": {"Name": {"title": {}}}
        })
    );
}

#[tokio::test]
async fn test_update_page_forwards_archived() {
    let (dispatcher, api) = dispatcher_with(RecordingNotionApi::new());
    dispatcher
        .call_tool(
            "notion_update_page",
            args(json!({"page_id": "p1", "properties": {}, "archived": true})),
        )
        .await;

    let call = api.last_call().unwrap();
    assert_eq!(call.id.as_deref(), Some("p1"));
    assert_eq!(call.payload, json!({"properties": {}, "archived": true}));
}
