use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Janus RPC server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Qtum node RPC endpoint URL
    pub qtum_rpc_url: String,
    /// Qtum node RPC username (basic auth)
    pub qtum_rpc_user: Option<String>,
    /// Qtum node RPC password (basic auth)
    pub qtum_rpc_password: Option<String>,
    /// Per-request timeout for calls to the Qtum node
    pub qtum_rpc_timeout: Duration,
    /// RPC server port
    pub janus_port: u16,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Call dotenvy::dotenv() before calling this.
    pub fn from_env() -> Result<Self> {
        let qtum_rpc_url =
            env::var("QTUM_RPC_URL").unwrap_or_else(|_| "http://localhost:3889".to_string());

        let qtum_rpc_user = env::var("QTUM_RPC_USER").ok().filter(|s| !s.is_empty());
        let qtum_rpc_password = env::var("QTUM_RPC_PASSWORD").ok().filter(|s| !s.is_empty());

        let timeout_secs: u64 = env::var("QTUM_RPC_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .context("QTUM_RPC_TIMEOUT_SECS must be a valid u64")?;

        let janus_port: u16 = env::var("JANUS_PORT")
            .unwrap_or_else(|_| "23889".to_string())
            .parse()
            .context("JANUS_PORT must be a valid u16")?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            qtum_rpc_url,
            qtum_rpc_user,
            qtum_rpc_password,
            qtum_rpc_timeout: Duration::from_secs(timeout_secs),
            janus_port,
            log_level,
        })
    }

    /// Whether basic auth credentials are configured for the Qtum node.
    pub fn has_credentials(&self) -> bool {
        self.qtum_rpc_user.is_some()
    }
}
