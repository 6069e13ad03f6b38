//! Model Context Protocol (MCP) server implementation
//!
//! This module provides an MCP server using the Streamable HTTP transport.
//! The server exposes five generic tools (create, read, update, delete,
//! action) over boards, stacks, cards, labels, comments and attachments.
//!
//! # Architecture
//!
//! - **server**: MCP server struct and `ServerHandler` implementation
//! - **tools**: tool argument structs and the tool router
//! - **service**: Streamable HTTP service factory for axum
//!
//! The server is generic over `T: DeckTransport`, so tests run the full
//! tool path against a scripted transport.

pub mod server;
mod service;
pub mod tools;

#[cfg(test)]
mod tools_test;

pub use server::McpServer;
pub use service::create_mcp_service;
