//! Daemon entry point for the context-bank MCP server.
//!
//! Loads configuration from the environment, builds the Onyx client, and
//! serves the MCP protocol over stdio, streamable HTTP, or both.

mod client;
mod config;

use context_bank_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing_subscriber::EnvFilter;

use crate::client::build_control_plane;
use crate::config::ContextBankConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenvy::dotenv();
    let config = ContextBankConfig::from_args()?;
    init_tracing(&config)?;

    let control = build_control_plane(&config)?;
    let http = config.mcp_http_addr.map(|addr| {
        McpHttpServerConfig::new(addr).with_stateful_mode(config.mcp_stateful)
    });

    match http {
        Some(http) if config.enable_stdio => {
            tokio::try_join!(
                serve_stdio(control.clone()),
                serve_streamable_http(control, http)
            )?;
        }
        Some(http) => serve_streamable_http(control, http).await?,
        None => serve_stdio(control).await?,
    }
    Ok(())
}

/// Logs go to stderr; stdout carries the stdio protocol.
fn init_tracing(config: &ContextBankConfig) -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
}
