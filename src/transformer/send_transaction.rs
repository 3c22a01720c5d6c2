use async_trait::async_trait;

use super::createcontract::create_contract;
use super::sendtocontract::send_to_contract;
use super::{transaction_param, AddressResolver, Result, Transformer};
use crate::eth::RpcEnvelope;

/// `eth_sendTransaction` -> `sendtocontract`, or `createcontract` when the
/// transaction has no recipient.
pub struct EthSendTransaction;

#[async_trait]
impl Transformer for EthSendTransaction {
    fn method(&self) -> &'static str {
        "eth_sendTransaction"
    }

    async fn transform(
        &self,
        envelope: &mut RpcEnvelope,
        resolver: &dyn AddressResolver,
    ) -> Result<()> {
        let tx = transaction_param(&envelope.params)?;
        if tx.is_create_contract() {
            create_contract(envelope, &tx, resolver).await
        } else {
            send_to_contract(envelope, &tx, resolver).await
        }
    }
}
