use serde_json::Value;

use super::Result;
use crate::qtum::types::{
    CallContractResponse, CreateContractResponse, SendToContractResponse, METHOD_CALL_CONTRACT,
    METHOD_CREATE_CONTRACT, METHOD_SEND_TO_CONTRACT,
};

/// Map a Qtum result back into the shape the Ethereum caller expects.
///
/// `qtum_method` is the outbound method the envelope was rewritten to.
/// Results of other methods are returned unchanged.
pub fn to_eth_result(qtum_method: &str, result: Value) -> Result<Value> {
    let mapped = match qtum_method {
        METHOD_SEND_TO_CONTRACT => {
            let response: SendToContractResponse = serde_json::from_value(result)?;
            Value::String(format!("0x{}", response.txid))
        }
        METHOD_CREATE_CONTRACT => {
            let response: CreateContractResponse = serde_json::from_value(result)?;
            Value::String(format!("0x{}", response.txid))
        }
        METHOD_CALL_CONTRACT => {
            let response: CallContractResponse = serde_json::from_value(result)?;
            Value::String(format!("0x{}", response.execution_result.output))
        }
        _ => result,
    };
    Ok(mapped)
}
