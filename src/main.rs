//! Janus RPC Translation Server
//!
//! Entry point for the server that bridges Ethereum JSON-RPC to a Qtum node.
//! Loads configuration from environment/.env file and starts the JSON-RPC
//! server on the configured port.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use janus_rpc::config::Config;
use janus_rpc::server::start_server;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .init();

    info!("=== Janus RPC Translation Server ===");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Bridging Ethereum JSON-RPC to Qtum");

    let config = Config::from_env()?;

    info!("Configuration:");
    info!("  Port: {}", config.janus_port);
    info!("  Qtum RPC: {}", config.qtum_rpc_url);
    info!("  Qtum RPC auth: {}", if config.has_credentials() { "basic" } else { "none" });
    info!("  Qtum RPC timeout: {:?}", config.qtum_rpc_timeout);
    info!("  Log level: {}", config.log_level);

    start_server(config).await?;

    Ok(())
}
