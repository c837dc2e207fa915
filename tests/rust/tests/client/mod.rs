//! Notion API client tests against a mock Notion server

mod retry;
