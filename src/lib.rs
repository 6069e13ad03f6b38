pub mod api;
pub mod bridge;
pub mod deck;
pub mod mcp;
pub mod serde_utils;

pub fn banner() -> &'static str {
    "Deck MCP bridge"
}
