//! Static tool descriptors
//!
//! Built once and shared; listing tools never touches the network.

use std::sync::OnceLock;

use serde_json::{json, Map, Value};

use super::ToolName;

/// Name, description and JSON Schema of one tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: ToolName,
    pub description: &'static str,
    pub input_schema: Map<String, Value>,
}

/// All ten descriptors, in listing order
pub fn tool_descriptors() -> &'static [ToolDescriptor] {
    static DESCRIPTORS: OnceLock<Vec<ToolDescriptor>> = OnceLock::new();
    DESCRIPTORS.get_or_init(|| ToolName::ALL.into_iter().map(describe).collect())
}

fn describe(name: ToolName) -> ToolDescriptor {
    let (description, schema) = match name {
        ToolName::Search => (
            "Search across Notion pages and databases",
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Search query text"},
                    "filter_type": {
                        "type": "string",
                        "enum": ["page", "database"],
                        "description": "Filter by object type"
                    },
                    "page_size": page_size_schema(),
                    "start_cursor": start_cursor_schema()
                }
            }),
        ),
        ToolName::GetDatabase => (
            "Get information about a Notion database",
            json!({
                "type": "object",
                "properties": {
                    "database_id": {"type": "string", "description": "The database ID"}
                },
                "required": ["database_id"]
            }),
        ),
        ToolName::QueryDatabase => (
            "Query a Notion database with optional filtering and sorting",
            json!({
                "type": "object",
                "properties": {
                    "database_id": {"type": "string", "description": "The database ID"},
                    "filter_criteria": {"type": "object", "description": "Filter criteria for the query"},
                    "sorts": {"type": "array", "description": "Sort criteria"},
                    "page_size": page_size_schema(),
                    "start_cursor": start_cursor_schema()
                },
                "required": ["database_id"]
            }),
        ),
        ToolName::CreateDatabase => (
            "Create a new Notion database",
            json!({
                "type": "object",
                "properties": {
                    "parent_page_id": {
                        "type": "string",
                        "description": "Parent page ID where the database will be created"
                    },
                    "title": {"type": "string", "description": "Database title"},
                    "properties": {"type": "object", "description": "Database schema properties"}
                },
                "required": ["parent_page_id", "title", "properties"]
            }),
        ),
        ToolName::GetPage => (
            "Get information about a Notion page",
            json!({
                "type": "object",
                "properties": {
                    "page_id": {"type": "string", "description": "The page ID"}
                },
                "required": ["page_id"]
            }),
        ),
        ToolName::CreatePage => (
            "Create a new Notion page",
            json!({
                "type": "object",
                "properties": {
                    "parent_type": {
                        "type": "string",
                        "enum": ["database", "page"],
                        "description": "Type of parent"
                    },
                    "parent_id": {"type": "string", "description": "Parent database or page ID"},
                    "properties": {"type": "object", "description": "Page properties"},
                    "children": {"type": "array", "description": "List of block children (optional)"}
                },
                "required": ["parent_type", "parent_id", "properties"]
            }),
        ),
        ToolName::UpdatePage => (
            "Update a Notion page's properties",
            json!({
                "type": "object",
                "properties": {
                    "page_id": {"type": "string", "description": "The page ID"},
                    "properties": {"type": "object", "description": "Properties to update"},
                    "archived": {"type": "boolean", "description": "Whether to archive the page"}
                },
                "required": ["page_id", "properties"]
            }),
        ),
        ToolName::GetBlockChildren => (
            "Get children blocks of a Notion page or block",
            json!({
                "type": "object",
                "properties": {
                    "block_id": {"type": "string", "description": "The block or page ID"},
                    "page_size": page_size_schema(),
                    "start_cursor": start_cursor_schema()
                },
                "required": ["block_id"]
            }),
        ),
        ToolName::AppendBlocks => (
            "Append blocks to a Notion page",
            json!({
                "type": "object",
                "properties": {
                    "block_id": {"type": "string", "description": "The parent block or page ID"},
                    "children": {"type": "array", "description": "List of blocks to append"}
                },
                "required": ["block_id", "children"]
            }),
        ),
        ToolName::GetCurrentUser => (
            "Get information about the current Notion integration user",
            json!({
                "type": "object",
                "properties": {}
            }),
        ),
    };

    let input_schema = match schema {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    ToolDescriptor {
        name,
        description,
        input_schema,
    }
}

fn page_size_schema() -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "maximum": 100,
        "description": "Number of results to return"
    })
}

fn start_cursor_schema() -> Value {
    json!({
        "type": "string",
        "description": "Cursor from a previous response's next_cursor"
    })
}
