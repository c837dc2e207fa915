//! Request shapes for the supported Notion operations
//!
//! Notion-defined structures (filters, sorts, property values, blocks) are
//! carried as raw JSON. Optional fields that were not supplied, or are empty,
//! are left out of the serialized payload entirely.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest page size Notion accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Clamp a requested page size; zero means "not supplied"
pub fn clamp_page_size(page_size: Option<u32>) -> Option<u32> {
    page_size
        .filter(|size| *size > 0)
        .map(|size| size.min(MAX_PAGE_SIZE))
}

fn is_absent_value(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn is_absent_str(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn is_absent_list(value: &Option<Vec<Value>>) -> bool {
    value.as_ref().map_or(true, Vec::is_empty)
}

/// Discriminated parent reference
///
/// Serializes as `{"type": "database_id", "database_id": "..."}` or
/// `{"type": "page_id", "page_id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parent {
    DatabaseId { database_id: String },
    PageId { page_id: String },
}

impl Parent {
    pub fn database(id: impl Into<String>) -> Self {
        Parent::DatabaseId {
            database_id: id.into(),
        }
    }

    pub fn page(id: impl Into<String>) -> Self {
        Parent::PageId { page_id: id.into() }
    }
}

/// Plain-text rich text item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichText {
    Text { text: TextContent },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    pub content: String,
}

impl RichText {
    pub fn plain(content: impl Into<String>) -> Self {
        RichText::Text {
            text: TextContent {
                content: content.into(),
            },
        }
    }
}

/// Object-type filter accepted by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchObject {
    Page,
    Database,
}

impl SearchObject {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchObject::Page => "page",
            SearchObject::Database => "database",
        }
    }

    /// `{"property": "object", "value": "page" | "database"}`
    pub fn to_filter(self) -> Value {
        serde_json::json!({ "property": "object", "value": self.as_str() })
    }
}

/// Body of `POST databases/{id}/query`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "is_absent_value")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "is_absent_list")]
    pub sorts: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "is_absent_str")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl DatabaseQuery {
    /// Apply page size clamping before the body leaves the process
    pub fn normalized(&self) -> Self {
        Self {
            page_size: clamp_page_size(self.page_size),
            ..self.clone()
        }
    }
}

/// Body of `POST databases`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDatabase {
    pub parent: Parent,
    pub title: Vec<RichText>,
    pub properties: Value,
}

impl CreateDatabase {
    /// New database under a page; the title is wrapped as plain rich text
    pub fn new(parent: Parent, title: impl Into<String>, properties: Value) -> Self {
        Self {
            parent,
            title: vec![RichText::plain(title)],
            properties,
        }
    }
}

/// Body of `POST pages`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePage {
    pub parent: Parent,
    pub properties: Value,
    #[serde(skip_serializing_if = "is_absent_list")]
    pub children: Option<Vec<Value>>,
}

/// Body of `PATCH pages/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageUpdate {
    pub properties: Value,
    /// Sent whenever supplied, including `false`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Cursor pagination for `GET blocks/{id}/children`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    pub start_cursor: Option<String>,
    pub page_size: Option<u32>,
}

impl Pagination {
    /// Query parameters, omitting anything not supplied
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(cursor) = self.start_cursor.as_deref().filter(|c| !c.is_empty()) {
            query.push(("start_cursor", cursor.to_string()));
        }
        if let Some(size) = clamp_page_size(self.page_size) {
            query.push(("page_size", size.to_string()));
        }
        query
    }
}

/// Body of `POST search`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "is_absent_str")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "is_absent_value")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "is_absent_list")]
    pub sorts: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "is_absent_str")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl SearchQuery {
    pub fn normalized(&self) -> Self {
        Self {
            page_size: clamp_page_size(self.page_size),
            ..self.clone()
        }
    }
}

/// Body of `PATCH blocks/{id}/children`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppendChildren<'a> {
    pub children: &'a [Value],
}
