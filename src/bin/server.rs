//! Deck MCP server binary.
//!
//! Resolves the Nextcloud connection settings, builds the concrete HTTP
//! transport and hands it to the server. The MCP layer stays agnostic of
//! the transport.

use std::net::IpAddr;

use clap::Parser;
use deck_mcp::api::{self, ApiError, Config};
use deck_mcp::deck::{ConfigError, DeckApi, DeckConfig, HttpTransport};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(deck_mcp::binary::config))]
    Config(#[from] ConfigError),

    #[error("API server error: {0}")]
    #[diagnostic(code(deck_mcp::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "deck-mcp")]
#[command(author, version, about = "MCP server for Nextcloud Deck", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Nextcloud base URL (default: NEXTCLOUD_URL env)
    #[arg(long)]
    url: Option<String>,

    /// Nextcloud user (default: NEXTCLOUD_USERNAME env)
    #[arg(long)]
    username: Option<String>,

    /// Nextcloud app password (default: NEXTCLOUD_PASSWORD env)
    #[arg(long)]
    password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    let deck = DeckConfig::resolve(cli.url, cli.username, cli.password)?;
    println!("Using Deck at {}", deck.url);

    let api = DeckApi::new(HttpTransport::new(&deck));

    api::run(
        Config {
            host: cli.host,
            port: cli.port,
        },
        api,
    )
    .await?;

    Ok(())
}
