//! Services: credential resolution, the Notion API client and its retry policy

pub mod credential_resolver;
pub mod notion_client;
pub mod retry;

pub use credential_resolver::{extract_access_token, CredentialResolver};
pub use notion_client::{NotionApi, NotionClient, NOTION_VERSION_HEADER};
pub use retry::{AttemptOutcome, RetryPolicy, RetryState};
