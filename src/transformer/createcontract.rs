use tracing::debug;

use super::conversion::{gas_params, normalize_hex, value_to_amount};
use super::{commit, resolve_sender, AddressResolver, Result, TransformError};
use crate::eth::{RpcEnvelope, TransactionReq};
use crate::qtum::types::{QtumParam, METHOD_CREATE_CONTRACT};

/// Rewrite a deployment transaction (no `to`) into `createcontract`.
///
/// Outbound params are `[bytecode, gasLimit, gasPrice, senderAddress?]`.
/// The node cannot fund a contract at creation, so a non-zero value is
/// rejected.
pub async fn create_contract(
    envelope: &mut RpcEnvelope,
    tx: &TransactionReq,
    resolver: &dyn AddressResolver,
) -> Result<()> {
    let bytecode = tx
        .data()
        .map(normalize_hex)
        .filter(|code| !code.is_empty())
        .ok_or_else(|| TransformError::InvalidParams("contract creation requires data".to_string()))?;

    if let Some(value) = tx.value() {
        let amount = value_to_amount(value).map_err(|e| e.in_field("value"))?;
        if !amount.is_zero() {
            return Err(TransformError::InvalidParams(format!(
                "createcontract cannot transfer value (got {})",
                amount
            )));
        }
    }

    let (gas_limit, gas_price) = gas_params(tx)?;

    let mut params = vec![
        QtumParam::Str(bytecode),
        QtumParam::Integer(gas_limit),
        QtumParam::Amount(gas_price),
    ];

    if let Some(sender) = resolve_sender(tx, resolver).await? {
        params.push(QtumParam::Str(sender));
    }

    debug!(
        "createcontract: gas_limit={}, gas_price={}, params={}",
        gas_limit,
        gas_price,
        params.len()
    );

    commit(envelope, METHOD_CREATE_CONTRACT, &params)
}
