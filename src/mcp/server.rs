//! MCP server implementation
//!
//! The server holds nothing but a shared handle to the immutable Deck API
//! client. Every tool call builds its own dispatcher, so no state is carried
//! between requests.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::deck::{DeckApi, DeckTransport};

/// Main MCP server coordinator
///
/// Generic over `T: DeckTransport` (no dynamic dispatch). Tool methods live in
/// [`crate::mcp::tools`].
pub struct McpServer<T: DeckTransport> {
    pub(super) api: Arc<DeckApi<T>>,
    pub(super) tool_router: ToolRouter<Self>,
}

// Manual Clone impl - only the Arc is cloned, T itself need not be Clone
impl<T: DeckTransport> Clone for McpServer<T> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            tool_router: self.tool_router.clone(),
        }
    }
}

#[tool_handler]
impl<T: DeckTransport + 'static> ServerHandler for McpServer<T> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "Nextcloud Deck MCP Server - create, read, update, delete and act on boards, stacks, cards, labels, comments and attachments. Card operations find the owning board and stack automatically when they are omitted."
                .to_string(),
        )
    }
}
