//! API route configuration.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio_util::sync::CancellationToken;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, HealthResponse};
use crate::deck::{DeckApi, DeckTransport};
use crate::mcp::create_mcp_service;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Deck MCP",
        version = "0.1.0",
        description = "MCP bridge to the Nextcloud Deck API",
        license(name = "MIT")
    ),
    paths(handlers::root, handlers::health),
    components(schemas(HealthResponse)),
    tags((name = "system", description = "System health and status endpoints"))
)]
pub struct ApiDoc;

/// Create the router: system routes, OpenAPI docs and the MCP service at `/mcp`.
pub fn create_router<T: DeckTransport + 'static>(
    api: Arc<DeckApi<T>>,
    cancellation_token: CancellationToken,
) -> Router {
    let system_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health));

    system_routes
        .nest_service("/mcp", create_mcp_service(api, cancellation_token))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
