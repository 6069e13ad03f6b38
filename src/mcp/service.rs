//! MCP Streamable HTTP service creation
//!
//! This module provides functions to create the MCP service
//! that can be integrated with an Axum router.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::deck::{DeckApi, DeckTransport};

use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// # Arguments
/// * `api` - Deck API client shared by every session
/// * `cancellation_token` - Token for graceful shutdown
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use deck_mcp::deck::{DeckApi, DeckConfig, HttpTransport};
/// # use deck_mcp::mcp::create_mcp_service;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let config = DeckConfig::from_env()?;
///
/// let api = Arc::new(DeckApi::new(HttpTransport::new(&config)));
/// let mcp_service = create_mcp_service(api, CancellationToken::new());
///
/// let app: Router = Router::new().nest_service("/mcp", mcp_service);
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service<T: DeckTransport + 'static>(
    api: Arc<DeckApi<T>>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<T>, LocalSessionManager> {
    // Service factory: creates new McpServer instance per session
    // Note: Returns io::Error to match rmcp's expected signature
    let service_factory =
        move || -> Result<McpServer<T>, std::io::Error> { Ok(McpServer::new(Arc::clone(&api))) };

    let config = StreamableHttpServerConfig::default()
        .with_stateful_mode(true)
        .with_cancellation_token(cancellation_token);

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
