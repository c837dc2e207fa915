//! Typed tool arguments
//!
//! Notion-defined structures (filters, sorts, properties, blocks) stay as
//! raw JSON and are passed through untouched.

use notion_mcp_core::{
    CreateDatabase, CreatePage, DatabaseQuery, PageUpdate, Pagination, Parent, SearchObject,
    SearchQuery,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::ToolName;
use crate::error::DispatchError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchArgs {
    pub query: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub filter_type: Option<SearchObject>,
    pub page_size: Option<u32>,
    pub start_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetDatabaseArgs {
    pub database_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryDatabaseArgs {
    pub database_id: String,
    pub filter_criteria: Option<Value>,
    pub sorts: Option<Vec<Value>>,
    pub page_size: Option<u32>,
    pub start_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateDatabaseArgs {
    pub parent_page_id: String,
    pub title: String,
    pub properties: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetPageArgs {
    pub page_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentType {
    Database,
    Page,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatePageArgs {
    pub parent_type: ParentType,
    pub parent_id: String,
    pub properties: Value,
    pub children: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdatePageArgs {
    pub page_id: String,
    pub properties: Value,
    pub archived: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetBlockChildrenArgs {
    pub block_id: String,
    pub page_size: Option<u32>,
    pub start_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppendBlocksArgs {
    pub block_id: String,
    pub children: Vec<Value>,
}

/// A decoded tool invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    Search(SearchArgs),
    GetDatabase(GetDatabaseArgs),
    QueryDatabase(QueryDatabaseArgs),
    CreateDatabase(CreateDatabaseArgs),
    GetPage(GetPageArgs),
    CreatePage(CreatePageArgs),
    UpdatePage(UpdatePageArgs),
    GetBlockChildren(GetBlockChildrenArgs),
    AppendBlocks(AppendBlocksArgs),
    GetCurrentUser,
}

impl ToolCall {
    /// Decode `arguments` for `tool`; missing arguments are an empty object
    pub fn decode(tool: ToolName, arguments: Option<Map<String, Value>>) -> Result<Self, DispatchError> {
        let arguments = Value::Object(arguments.unwrap_or_default());

        Ok(match tool {
            ToolName::Search => ToolCall::Search(parse(arguments)?),
            ToolName::GetDatabase => ToolCall::GetDatabase(parse(arguments)?),
            ToolName::QueryDatabase => ToolCall::QueryDatabase(parse(arguments)?),
            ToolName::CreateDatabase => ToolCall::CreateDatabase(parse(arguments)?),
            ToolName::GetPage => ToolCall::GetPage(parse(arguments)?),
            ToolName::CreatePage => ToolCall::CreatePage(parse(arguments)?),
            ToolName::UpdatePage => ToolCall::UpdatePage(parse(arguments)?),
            ToolName::GetBlockChildren => ToolCall::GetBlockChildren(parse(arguments)?),
            ToolName::AppendBlocks => ToolCall::AppendBlocks(parse(arguments)?),
            ToolName::GetCurrentUser => ToolCall::GetCurrentUser,
        })
    }

    pub fn tool(&self) -> ToolName {
        match self {
            ToolCall::Search(_) => ToolName::Search,
            ToolCall::GetDatabase(_) => ToolName::GetDatabase,
            ToolCall::QueryDatabase(_) => ToolName::QueryDatabase,
            ToolCall::CreateDatabase(_) => ToolName::CreateDatabase,
            ToolCall::GetPage(_) => ToolName::GetPage,
            ToolCall::CreatePage(_) => ToolName::CreatePage,
            ToolCall::UpdatePage(_) => ToolName::UpdatePage,
            ToolCall::GetBlockChildren(_) => ToolName::GetBlockChildren,
            ToolCall::AppendBlocks(_) => ToolName::AppendBlocks,
            ToolCall::GetCurrentUser => ToolName::GetCurrentUser,
        }
    }
}

fn parse<T: DeserializeOwned>(arguments: Value) -> Result<T, DispatchError> {
    serde_json::from_value(arguments).map_err(|e| DispatchError::InvalidArguments(e.to_string()))
}

/// `""` is treated like an absent value
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl From<&SearchArgs> for SearchQuery {
    fn from(args: &SearchArgs) -> Self {
        SearchQuery {
            query: args.query.clone(),
            filter: args.filter_type.map(SearchObject::to_filter),
            sorts: None,
            start_cursor: args.start_cursor.clone(),
            page_size: args.page_size,
        }
    }
}

impl From<&QueryDatabaseArgs> for DatabaseQuery {
    fn from(args: &QueryDatabaseArgs) -> Self {
        DatabaseQuery {
            filter: args.filter_criteria.clone(),
            sorts: args.sorts.clone(),
            start_cursor: args.start_cursor.clone(),
            page_size: args.page_size,
        }
    }
}

impl From<&CreateDatabaseArgs> for CreateDatabase {
    fn from(args: &CreateDatabaseArgs) -> Self {
        CreateDatabase::new(
            Parent::page(args.parent_page_id.clone()),
            args.title.clone(),
            args.properties.clone(),
        )
    }
}

impl From<&CreatePageArgs> for CreatePage {
    fn from(args: &CreatePageArgs) -> Self {
        let parent = match args.parent_type {
            ParentType::Database => Parent::database(args.parent_id.clone()),
            ParentType::Page => Parent::page(args.parent_id.clone()),
        };
        CreatePage {
            parent,
            properties: args.properties.clone(),
            children: args.children.clone(),
        }
    }
}

impl From<&UpdatePageArgs> for PageUpdate {
    fn from(args: &UpdatePageArgs) -> Self {
        PageUpdate {
            properties: args.properties.clone(),
            archived: args.archived,
        }
    }
}

impl From<&GetBlockChildrenArgs> for Pagination {
    fn from(args: &GetBlockChildrenArgs) -> Self {
        Pagination {
            start_cursor: args.start_cursor.clone(),
            page_size: args.page_size,
        }
    }
}
