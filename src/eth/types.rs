use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transaction object carried by eth_sendTransaction and eth_call.
///
/// All numeric fields are hex quantities in wei, usually `0x`-prefixed.
/// An empty string is treated the same as an absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Gas limit (unit count)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
    /// Gas price in wei per gas unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    /// Value in wei
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Call payload or contract bytecode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl TransactionReq {
    pub fn from(&self) -> Option<&str> {
        non_empty(&self.from)
    }

    pub fn to(&self) -> Option<&str> {
        non_empty(&self.to)
    }

    pub fn gas(&self) -> Option<&str> {
        non_empty(&self.gas)
    }

    pub fn gas_price(&self) -> Option<&str> {
        non_empty(&self.gas_price)
    }

    pub fn value(&self) -> Option<&str> {
        non_empty(&self.value)
    }

    pub fn data(&self) -> Option<&str> {
        non_empty(&self.data)
    }

    /// A transaction without a recipient deploys `data` as a new contract.
    pub fn is_create_contract(&self) -> bool {
        self.to().is_none()
    }
}

/// Method name plus parameter payload of a JSON-RPC call.
///
/// Transformers rewrite both fields in place, and only once every derived
/// value has been computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcEnvelope {
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl RpcEnvelope {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}
