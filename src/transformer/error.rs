use std::time::Duration;

use thiserror::Error;

/// Errors returned by an [`AddressResolver`](super::AddressResolver).
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The node answered with a JSON-RPC error.
    #[error("Qtum RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Address resolution timed out after {0:?}")]
    Timeout(Duration),
    #[error("Invalid resolver response: {0}")]
    InvalidResponse(String),
}

/// Errors that abort a request transform.
///
/// A transform that returns any of these has left the envelope untouched.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Malformed hex {input:?}: {reason}")]
    MalformedHex { input: String, reason: String },
    #[error("Conversion overflow: {0}")]
    ConversionOverflow(String),
    /// Resolver failure, passed through unchanged.
    #[error(transparent)]
    AddressResolution(#[from] ResolverError),
    #[error("Failed to serialize params: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Method not supported: {0}")]
    MethodNotSupported(String),
    #[error("Invalid params: {0}")]
    InvalidParams(String),
    /// Conversion failure annotated with the offending transaction field.
    #[error("{field}: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: Box<TransformError>,
    },
}

impl TransformError {
    pub fn malformed_hex(input: &str, reason: impl Into<String>) -> Self {
        TransformError::MalformedHex {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Wrap this error with the name of the field being converted.
    pub fn in_field(self, field: &'static str) -> Self {
        TransformError::Field {
            field,
            source: Box::new(self),
        }
    }

    /// The innermost error, with field annotations peeled off.
    pub fn root(&self) -> &TransformError {
        match self {
            TransformError::Field { source, .. } => source.root(),
            other => other,
        }
    }

    /// JSON-RPC error code for reporting this failure to the caller.
    pub fn rpc_code(&self) -> i32 {
        match self.root() {
            TransformError::MethodNotSupported(_) => -32601,
            TransformError::MalformedHex { .. }
            | TransformError::InvalidParams(_)
            | TransformError::ConversionOverflow(_) => -32602,
            _ => -32603,
        }
    }
}

pub type Result<T, E = TransformError> = std::result::Result<T, E>;
