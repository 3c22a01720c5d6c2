use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use jsonrpsee::server::{RpcModule, Server};
use jsonrpsee::types::{ErrorObjectOwned, Params};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::eth::RpcEnvelope;
use crate::qtum::QtumClient;
use crate::transformer::response::to_eth_result;
use crate::transformer::{Manager, TransformError};

/// Shared state for the RPC server.
pub struct RpcState {
    pub qtum_client: QtumClient,
    pub manager: Manager,
}

/// Start the JSON-RPC server.
pub async fn start_server(config: Config) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.janus_port));

    info!("Starting Janus RPC Server on {}", addr);
    info!("Qtum RPC: {}", config.qtum_rpc_url);

    let qtum_client = QtumClient::new(&config)?;

    // Check Qtum node reachability
    match qtum_client.get_block_count().await {
        Ok(height) => info!("Qtum node reachable, block height {}", height),
        Err(e) => warn!("Could not reach Qtum node (will retry on requests): {:#}", e),
    }

    let manager = Manager::new(Arc::new(qtum_client.clone()));
    let methods = manager.methods();

    let state = Arc::new(RpcState {
        qtum_client,
        manager,
    });

    let mut module = RpcModule::new(state.clone());
    register_methods(&mut module, &methods)?;

    let server = Server::builder()
        .build(addr)
        .await
        .map_err(|e| anyhow!("Failed to bind server to {}: {}", addr, e))?;

    info!("Janus RPC Server listening on http://{}", addr);

    let handle = server.start(module);

    // Wait for the server to finish (runs until shutdown signal)
    handle.stopped().await;

    info!("Janus RPC Server stopped");
    Ok(())
}

/// Register one JSON-RPC method per transformer known to the manager.
fn register_methods(module: &mut RpcModule<Arc<RpcState>>, methods: &[&'static str]) -> Result<()> {
    for &method in methods {
        module.register_async_method(method, move |params, ctx, _| async move {
            forward(&ctx, method, inbound_params(&params)).await
        })?;
    }

    info!("Registered RPC methods: {}", methods.join(", "));
    Ok(())
}

/// Raw inbound params, positional or named. Missing params become `null`.
fn inbound_params(params: &Params<'_>) -> Value {
    params.parse::<Value>().unwrap_or(Value::Null)
}

/// Transform an inbound call, send it to the node, and map the result back.
async fn forward(state: &RpcState, method: &str, params: Value) -> Result<Value, ErrorObjectOwned> {
    let mut envelope = RpcEnvelope::new(method, params);

    state.manager.transform(&mut envelope).await.map_err(|e| {
        warn!("{} rejected: {}", method, e);
        transform_error(&e)
    })?;

    debug!("{} -> {} {}", method, envelope.method, envelope.params);

    let result = state
        .qtum_client
        .request(&envelope.method, envelope.params)
        .await
        .map_err(|e| jsonrpsee_error(-32603, &format!("{:#}", e)))?;

    to_eth_result(&envelope.method, result).map_err(|e| transform_error(&e))
}

fn transform_error(error: &TransformError) -> ErrorObjectOwned {
    jsonrpsee_error(error.rpc_code(), &error.to_string())
}

/// Create a jsonrpsee error from a code and message.
fn jsonrpsee_error(code: i32, message: &str) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(code, message.to_string(), None::<()>)
}
