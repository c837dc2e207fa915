//! Tool registry and dispatch

mod args;
mod dispatcher;
mod registry;

use std::fmt;
use std::str::FromStr;

pub use args::{
    AppendBlocksArgs, CreateDatabaseArgs, CreatePageArgs, GetBlockChildrenArgs, GetDatabaseArgs,
    GetPageArgs, ParentType, QueryDatabaseArgs, SearchArgs, ToolCall, UpdatePageArgs,
};
pub use dispatcher::{Dispatcher, ToolOutput};
pub use registry::{tool_descriptors, ToolDescriptor};

/// The fixed set of exposed tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    Search,
    GetDatabase,
    QueryDatabase,
    CreateDatabase,
    GetPage,
    CreatePage,
    UpdatePage,
    GetBlockChildren,
    AppendBlocks,
    GetCurrentUser,
}

impl ToolName {
    /// Every tool, in listing order
    pub const ALL: [ToolName; 10] = [
        ToolName::Search,
        ToolName::GetDatabase,
        ToolName::QueryDatabase,
        ToolName::CreateDatabase,
        ToolName::GetPage,
        ToolName::CreatePage,
        ToolName::UpdatePage,
        ToolName::GetBlockChildren,
        ToolName::AppendBlocks,
        ToolName::GetCurrentUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::Search => "notion_search",
            ToolName::GetDatabase => "notion_get_database",
            ToolName::QueryDatabase => "notion_query_database",
            ToolName::CreateDatabase => "notion_create_database",
            ToolName::GetPage => "notion_get_page",
            ToolName::CreatePage => "notion_create_page",
            ToolName::UpdatePage => "notion_update_page",
            ToolName::GetBlockChildren => "notion_get_block_children",
            ToolName::AppendBlocks => "notion_append_blocks",
            ToolName::GetCurrentUser => "notion_get_current_user",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
