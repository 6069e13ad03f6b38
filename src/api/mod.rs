//! HTTP server hosting the MCP endpoint.
//!
//! The server is a thin shell: it mounts the MCP Streamable HTTP service at
//! `/mcp` next to health and documentation routes, and shuts down gracefully
//! on Ctrl-C.

mod handlers;
pub mod routes;


use std::net::IpAddr;
use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::deck::{DeckApi, DeckTransport};

pub use handlers::HealthResponse;

const DEFAULT_FILTER: &str = "deck_mcp=debug,tower_http=debug";

/// API server errors.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}")]
    #[diagnostic(
        code(deck_mcp::api::bind),
        help("Is another process already listening on this port? Try --port.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(deck_mcp::api::serve))]
    Serve(#[source] std::io::Error),
}

/// API server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
        }
    }
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration and Deck client.
pub async fn run<T: DeckTransport + 'static>(config: Config, api: DeckApi<T>) -> Result<(), ApiError> {
    init_tracing();

    let ct = CancellationToken::new();
    let app = routes::create_router(Arc::new(api), ct.clone()).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("MCP server listening on http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown requested");
            ct.cancel();
        })
        .await
        .map_err(ApiError::Serve)?;

    info!("server stopped");
    Ok(())
}
