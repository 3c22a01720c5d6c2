use rust_decimal::Decimal;
use tracing::debug;

use super::conversion::{gas_params, normalize_hex, value_to_amount};
use super::{commit, resolve_sender, AddressResolver, Result};
use crate::eth::{RpcEnvelope, TransactionReq};
use crate::qtum::types::{QtumParam, METHOD_SEND_TO_CONTRACT};

/// Rewrite a contract-invocation transaction into `sendtocontract`.
///
/// Outbound params are
/// `[contractAddress, dataHex, amount, gasLimit, gasPrice, senderAddress?]`,
/// with the sender present only when the transaction names one.
pub async fn send_to_contract(
    envelope: &mut RpcEnvelope,
    tx: &TransactionReq,
    resolver: &dyn AddressResolver,
) -> Result<()> {
    let (gas_limit, gas_price) = gas_params(tx)?;

    let amount = match tx.value() {
        Some(value) => value_to_amount(value).map_err(|e| e.in_field("value"))?,
        None => Decimal::ZERO,
    };

    let mut params = vec![
        QtumParam::Str(normalize_hex(tx.to().unwrap_or_default())),
        QtumParam::Str(normalize_hex(tx.data().unwrap_or_default())),
        QtumParam::Amount(amount),
        QtumParam::Integer(gas_limit),
        QtumParam::Amount(gas_price),
    ];

    if let Some(sender) = resolve_sender(tx, resolver).await? {
        params.push(QtumParam::Str(sender));
    }

    debug!(
        "sendtocontract: amount={}, gas_limit={}, gas_price={}, params={}",
        amount,
        gas_limit,
        gas_price,
        params.len()
    );

    commit(envelope, METHOD_SEND_TO_CONTRACT, &params)
}
