use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use super::types::*;
use crate::config::Config;
use crate::transformer::{AddressResolver, ResolverError};

/// Client wrapper for Qtum node RPC calls.
#[derive(Clone)]
pub struct QtumClient {
    http_client: Client,
    rpc_url: String,
    user: Option<String>,
    password: Option<String>,
    timeout: Duration,
}

impl QtumClient {
    /// Create a new Qtum RPC client.
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.qtum_rpc_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            rpc_url: config.qtum_rpc_url.clone(),
            user: config.qtum_rpc_user.clone(),
            password: config.qtum_rpc_password.clone(),
            timeout: config.qtum_rpc_timeout,
        })
    }

    /// Send a JSON-RPC request to the Qtum node and return its `result`.
    async fn send_request(&self, request: &QtumRpcRequest) -> Result<Value, ResolverError> {
        debug!("Sending Qtum RPC request: method={}", request.method);

        let mut builder = self.http_client.post(&self.rpc_url).json(request);
        if let Some(user) = &self.user {
            builder = builder.basic_auth(user, self.password.as_ref());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ResolverError::Timeout(self.timeout)
            } else {
                ResolverError::Transport(e.to_string())
            }
        })?;

        // The node reports RPC errors with a non-2xx status and a JSON body.
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ResolverError::Transport(e.to_string()))?;

        let rpc_response: QtumRpcResponse = serde_json::from_str(&body).map_err(|_| {
            error!("Qtum RPC returned HTTP {}: {}", status, body);
            ResolverError::InvalidResponse(format!("HTTP {}: {}", status, body))
        })?;

        if let Some(err) = rpc_response.error {
            warn!(
                "Qtum RPC error: method={}, code={}, message={}",
                request.method, err.code, err.message
            );
            return Err(ResolverError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        Ok(rpc_response.result.unwrap_or(Value::Null))
    }

    /// Call an arbitrary node method with positional params.
    pub async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let request = QtumRpcRequest::new(method, params);
        let result = self
            .send_request(&request)
            .await
            .with_context(|| format!("Qtum RPC {} failed", method))?;
        Ok(result)
    }

    /// Check that the node is reachable; returns the current block height.
    pub async fn get_block_count(&self) -> Result<u64> {
        let result = self.request("getblockcount", json!([])).await?;
        result
            .as_u64()
            .context("getblockcount returned a non-integer result")
    }

    /// Convert a hex address to a base58 Qtum address via `fromhexaddress`.
    pub async fn from_hex_address(&self, hex_address: &str) -> Result<String, ResolverError> {
        let request = QtumRpcRequest::new(METHOD_FROM_HEX_ADDRESS, json!([hex_address]));
        let result = self.send_request(&request).await?;
        match result {
            Value::String(address) => Ok(address),
            other => Err(ResolverError::InvalidResponse(format!(
                "fromhexaddress returned {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl AddressResolver for QtumClient {
    async fn resolve_to_native(&self, hex_address: &str) -> Result<String, ResolverError> {
        self.from_hex_address(hex_address).await
    }
}
