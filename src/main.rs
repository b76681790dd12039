use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing_subscriber::EnvFilter;

use mcp_zillow::adapters::scraper::client::ZillowScraper;
use mcp_zillow::config::load_config;
use mcp_zillow::mcp::server::ZillowMcpServer;
use mcp_zillow::ports::zillow_client::ZillowClient;

fn find_config_path() -> PathBuf {
    let candidates = [PathBuf::from("config.yaml"), exe_dir().join("config.yaml")];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting mcp-zillow server");

    let config_path = find_config_path();
    let config = load_config(&config_path)?;
    tracing::info!(
        base_url = %config.client.base_url,
        proxied = config.client.proxy_url.is_some(),
        strict_status = config.client.strict_status,
        "Configuration loaded"
    );

    let client: Arc<dyn ZillowClient> = Arc::new(ZillowScraper::new(config.client)?);
    let server = ZillowMcpServer::new(client);

    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
