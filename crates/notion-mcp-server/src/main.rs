//! notion-mcp-server binary
//!
//! Resolves a Notion token once, then serves MCP over stdio until the peer
//! disconnects.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use notion_mcp_core::{CredentialResolver, NotionClient};
use notion_mcp_server::{logging, Dispatcher, NotionMcpHandler, ServerConfig};
use rmcp::{transport::stdio, ServiceExt};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // .env values win over the inherited environment
    dotenvy::dotenv_override().ok();

    let config = ServerConfig::from_env();
    let _log_guard = logging::init_tracing(
        config
            .as_ref()
            .ok()
            .and_then(|config| config.log_dir.as_deref()),
    );

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("notion-mcp-server stopped: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> anyhow::Result<()> {
    info!(version = env!("CARGO_PKG_VERSION"), "Starting notion-mcp-server");

    let source = config
        .credential_source()
        .context("Failed to initialize Notion client")?;
    let token = CredentialResolver::new(config.broker_config())
        .resolve(&source)
        .await
        .context("Failed to initialize Notion client")?;

    let client = NotionClient::new(config.client_config(token))
        .context("Failed to build Notion client")?;
    info!(
        notion_version = %client.config().notion_version,
        "Notion client initialized"
    );

    let handler = NotionMcpHandler::new(Dispatcher::new(Arc::new(client)));
    let service = handler
        .serve(stdio())
        .await
        .context("Failed to start MCP stdio transport")?;

    service.waiting().await.context("MCP service failed")?;
    info!("MCP peer disconnected, shutting down");
    Ok(())
}
