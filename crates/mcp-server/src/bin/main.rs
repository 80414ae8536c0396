//! Solana Wallet Analyzer MCP server
//!
//! Exposes the wallet analyzer backend as MCP tools. Started with no
//! arguments it speaks MCP over stdio against the hosted backend.

use analyzer_client::{ClientConfig, HttpBackend, DEFAULT_BASE_URL};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use wallet_analyzer_mcp::{McpServer, ServerMode};

/// Solana Wallet Analyzer - wallet, token and PNL lookups via MCP
#[derive(Parser, Debug)]
#[command(name = "wallet-analyzer-mcp")]
#[command(version)]
#[command(about = "Solana Wallet Analyzer - wallet, token and PNL lookups via MCP")]
struct Args {
    /// Run in stdio mode (for MCP clients like Claude Desktop)
    #[arg(long, conflicts_with = "http")]
    stdio: bool,

    /// Run in HTTP mode
    #[arg(long)]
    http: bool,

    /// Port for HTTP server
    #[arg(long, default_value = "3000")]
    port: u16,

    /// Origin of the wallet analyzer backend
    #[arg(long, env = "WALLET_ANALYZER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Backend request timeout in seconds (no timeout when unset)
    #[arg(long, env = "WALLET_ANALYZER_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr; stdout belongs to the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let mut config = ClientConfig::new(&args.base_url)
        .map_err(|e| format!("Invalid backend origin {}: {}", args.base_url, e))?;
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let backend = HttpBackend::new(config)
        .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

    // Default to stdio for MCP client compatibility
    let mode = if args.stdio || !args.http {
        ServerMode::Stdio
    } else {
        ServerMode::Http { port: args.port }
    };

    info!("Solana Wallet Analyzer MCP v{}", env!("CARGO_PKG_VERSION"));

    let server = McpServer::new(Arc::new(backend)).with_mode(mode);
    server.run().await?;

    Ok(())
}
