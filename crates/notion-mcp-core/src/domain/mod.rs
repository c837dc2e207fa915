//! Domain entities: credentials, client configuration and request shapes

pub mod config;
pub mod credential;
pub mod request;

pub use config::{ClientConfig, DEFAULT_NOTION_VERSION, DEFAULT_REQUEST_TIMEOUT, NOTION_API_BASE_URL};
pub use credential::{BearerToken, BrokerConfig, BrokerConnection, CredentialSource};
pub use request::{
    clamp_page_size, AppendChildren, CreateDatabase, CreatePage, DatabaseQuery, PageUpdate,
    Pagination, Parent, RichText, SearchObject, SearchQuery, TextContent, MAX_PAGE_SIZE,
};
