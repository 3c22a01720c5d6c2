use rust_decimal::Decimal;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};

pub const METHOD_SEND_TO_CONTRACT: &str = "sendtocontract";
pub const METHOD_CREATE_CONTRACT: &str = "createcontract";
pub const METHOD_CALL_CONTRACT: &str = "callcontract";
pub const METHOD_FROM_HEX_ADDRESS: &str = "fromhexaddress";

/// One positional argument of a Qtum RPC call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QtumParam {
    Str(String),
    /// QTUM amount or price, emitted as a JSON number.
    Amount(Decimal),
    Integer(u64),
}

impl Serialize for QtumParam {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QtumParam::Str(s) => serializer.serialize_str(s),
            QtumParam::Integer(n) => serializer.serialize_u64(*n),
            QtumParam::Amount(amount) => {
                let number = amount
                    .to_string()
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .ok_or_else(|| {
                        S::Error::custom(format!("amount {} is not a JSON number", amount))
                    })?;
                serializer.serialize_f64(number)
            }
        }
    }
}

/// JSON-RPC request to the Qtum node
#[derive(Debug, Serialize)]
pub struct QtumRpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: serde_json::Value,
}

impl QtumRpcRequest {
    pub fn new(method: &str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "1.0".to_string(),
            id: 1,
            method: method.to_string(),
            params,
        }
    }
}

/// JSON-RPC response from the Qtum node
#[derive(Debug, Deserialize)]
pub struct QtumRpcResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<QtumRpcError>,
}

/// JSON-RPC error from the Qtum node
#[derive(Debug, Deserialize)]
pub struct QtumRpcError {
    pub code: i64,
    pub message: String,
}

/// Result of sendtocontract
#[derive(Debug, Deserialize)]
pub struct SendToContractResponse {
    pub txid: String,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub hash160: Option<String>,
}

/// Result of createcontract
#[derive(Debug, Deserialize)]
pub struct CreateContractResponse {
    pub txid: String,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub hash160: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Result of callcontract
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallContractResponse {
    pub address: String,
    pub execution_result: ExecutionResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    #[serde(default)]
    pub gas_used: Option<u64>,
    #[serde(default)]
    pub excepted: Option<String>,
    pub output: String,
}
