use async_trait::async_trait;
use tracing::debug;

use super::conversion::normalize_hex;
use super::{
    commit, resolve_sender, transaction_param, AddressResolver, Result, TransformError,
    Transformer,
};
use crate::eth::{RpcEnvelope, TransactionReq};
use crate::qtum::types::{QtumParam, METHOD_CALL_CONTRACT};

/// Rewrite a read-only call into `callcontract`.
///
/// Outbound params are `[contractAddress, dataHex, senderAddress?]`.
pub async fn call_contract(
    envelope: &mut RpcEnvelope,
    tx: &TransactionReq,
    resolver: &dyn AddressResolver,
) -> Result<()> {
    let to = tx
        .to()
        .ok_or_else(|| TransformError::InvalidParams("eth_call requires 'to'".to_string()))?;

    let mut params = vec![
        QtumParam::Str(normalize_hex(to)),
        QtumParam::Str(normalize_hex(tx.data().unwrap_or_default())),
    ];

    if let Some(sender) = resolve_sender(tx, resolver).await? {
        params.push(QtumParam::Str(sender));
    }

    debug!("callcontract: params={}", params.len());

    commit(envelope, METHOD_CALL_CONTRACT, &params)
}

/// `eth_call` -> `callcontract`
pub struct EthCall;

#[async_trait]
impl Transformer for EthCall {
    fn method(&self) -> &'static str {
        "eth_call"
    }

    async fn transform(
        &self,
        envelope: &mut RpcEnvelope,
        resolver: &dyn AddressResolver,
    ) -> Result<()> {
        let tx = transaction_param(&envelope.params)?;
        call_contract(envelope, &tx, resolver).await
    }
}
