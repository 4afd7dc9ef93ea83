//! MCP server runners for context-bank.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use context_bank_core::client::Transport;
use context_bank_core::control::OnyxControlPlane;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

use crate::ContextBankMcp;

/// Configuration for the MCP streamable HTTP server.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
    pub sse_retry: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
            sse_retry: Some(Duration::from_secs(3)),
        }
    }

    #[must_use]
    pub const fn with_stateful_mode(mut self, stateful_mode: bool) -> Self {
        self.stateful_mode = stateful_mode;
        self
    }
}

/// Serves the MCP server over stdio.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio<T: Transport>(
    control: OnyxControlPlane<T>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    serve_io(ContextBankMcp::new(control), stdio()).await
}

/// Announces readiness before the client handshake, then serves until the
/// peer disconnects.
async fn serve_io<T, R, W>(
    service: ContextBankMcp<T>,
    io: (R, W),
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    T: Transport,
    R: AsyncRead + Send + Unpin + 'static,
    W: AsyncWrite + Send + Unpin + 'static,
{
    info!("Context Bank MCP Server running on stdio");
    let running = serve_server(service, io).await?;
    let _ = running.waiting().await?;
    Ok(())
}

/// Serves the MCP server using streamable HTTP transport.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_streamable_http<T: Transport>(
    control: OnyxControlPlane<T>,
    config: McpHttpServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service: StreamableHttpService<ContextBankMcp<T>, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(ContextBankMcp::new(control.clone())),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                sse_keep_alive: config.sse_keep_alive,
                sse_retry: config.sse_retry,
                stateful_mode: config.stateful_mode,
                ..Default::default()
            },
        );

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", service);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Context Bank MCP Server listening on http://{}/mcp", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use serde_json::json;
    use tracing_subscriber::util::SubscriberInitExt;

    use super::*;
    use crate::test_support::{FakeTransport, server};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("log lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn stdio_ready_line_precedes_handshake() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let _guard = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .set_default();

        let (server_side, client_side) = tokio::io::duplex(1024);
        drop(client_side);
        let result = serve_io(
            server(&FakeTransport::json(&json!({}))),
            tokio::io::split(server_side),
        )
        .await;

        assert!(result.is_err(), "closed peer never initializes");
        let logs = String::from_utf8(logs.0.lock().expect("log lock").clone())
            .expect("logs are utf-8");
        assert!(logs.contains("Context Bank MCP Server running on stdio"));
    }
}
