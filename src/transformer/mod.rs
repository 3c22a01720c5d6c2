//! Ethereum-to-Qtum request transformation.
//!
//! A [`Manager`] maps inbound Ethereum method names to [`Transformer`]s and
//! owns the [`AddressResolver`] they share. Each transformer rewrites an
//! [`RpcEnvelope`] into the equivalent Qtum call. Transformers mutate the
//! envelope only through [`commit`], after every derived value is known, so a
//! failed or cancelled transform leaves the envelope exactly as it was.

pub mod callcontract;
pub mod conversion;
pub mod createcontract;
pub mod error;
pub mod resolver;
pub mod response;
pub mod send_transaction;
pub mod sendtocontract;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::eth::{RpcEnvelope, TransactionReq};
use crate::qtum::types::QtumParam;

pub use callcontract::EthCall;
pub use error::{ResolverError, Result, TransformError};
pub use resolver::{Address, AddressResolver};
pub use send_transaction::EthSendTransaction;

/// Rewrites one inbound Ethereum method into a Qtum call.
#[async_trait]
pub trait Transformer: Send + Sync {
    /// Inbound method name handled by this transformer.
    fn method(&self) -> &'static str;

    async fn transform(
        &self,
        envelope: &mut RpcEnvelope,
        resolver: &dyn AddressResolver,
    ) -> Result<()>;
}

/// Dispatches envelopes to their transformer by method name.
pub struct Manager {
    resolver: Arc<dyn AddressResolver>,
    transformers: HashMap<&'static str, Arc<dyn Transformer>>,
}

impl Manager {
    /// Create a manager with the default transformers registered.
    pub fn new(resolver: Arc<dyn AddressResolver>) -> Self {
        let mut manager = Self::empty(resolver);
        manager.register(Arc::new(EthSendTransaction));
        manager.register(Arc::new(EthCall));
        manager
    }

    /// Create a manager with no transformers.
    pub fn empty(resolver: Arc<dyn AddressResolver>) -> Self {
        Self {
            resolver,
            transformers: HashMap::new(),
        }
    }

    /// Register a transformer, replacing any previous one for the same method.
    pub fn register(&mut self, transformer: Arc<dyn Transformer>) {
        self.transformers.insert(transformer.method(), transformer);
    }

    pub fn supports(&self, method: &str) -> bool {
        self.transformers.contains_key(method)
    }

    /// Registered inbound method names, sorted.
    pub fn methods(&self) -> Vec<&'static str> {
        let mut methods: Vec<_> = self.transformers.keys().copied().collect();
        methods.sort_unstable();
        methods
    }

    /// Transform `envelope` in place into its Qtum equivalent.
    pub async fn transform(&self, envelope: &mut RpcEnvelope) -> Result<()> {
        let transformer = match self.transformers.get(envelope.method.as_str()) {
            Some(transformer) => Arc::clone(transformer),
            None => {
                warn!("No transformer for method {}", envelope.method);
                return Err(TransformError::MethodNotSupported(envelope.method.clone()));
            }
        };

        debug!("Transforming {}", envelope.method);
        transformer.transform(envelope, self.resolver.as_ref()).await
    }
}

/// Extract the transaction object from `[tx, ...]` or a bare `tx` param.
pub fn transaction_param(params: &Value) -> Result<TransactionReq> {
    let object = match params {
        Value::Array(items) => items.first(),
        Value::Object(_) => Some(params),
        _ => None,
    }
    .filter(|v| v.is_object())
    .ok_or_else(|| TransformError::InvalidParams("expected a transaction object".to_string()))?;

    serde_json::from_value(object.clone())
        .map_err(|e| TransformError::InvalidParams(format!("invalid transaction object: {}", e)))
}

/// Resolve the transaction sender, if any, to a native address.
pub async fn resolve_sender(
    tx: &TransactionReq,
    resolver: &dyn AddressResolver,
) -> Result<Option<String>> {
    match tx.from() {
        Some(from) => {
            let native = Address::classify(from).into_native(resolver).await?;
            Ok(Some(native))
        }
        None => Ok(None),
    }
}

/// Write the outbound method and params into the envelope.
///
/// Params are serialized before anything is assigned, so a serialization
/// failure leaves the envelope unmodified.
pub fn commit(envelope: &mut RpcEnvelope, method: &str, params: &[QtumParam]) -> Result<()> {
    let params = serde_json::to_value(params)?;
    envelope.params = params;
    envelope.method = method.to_string();
    Ok(())
}
