use async_trait::async_trait;

use super::conversion::{is_ethereum_hex_address, strip_hex_prefix};
use super::error::ResolverError;

/// Converts Ethereum hex addresses into Qtum native addresses.
///
/// Shared by every in-flight transform, so implementations must be safe to
/// call concurrently. Callers may drop the returned future at any point.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolve a 40-character hex address (no `0x` prefix) to its native form.
    async fn resolve_to_native(&self, hex_address: &str) -> Result<String, ResolverError>;
}

/// A sender address as supplied by an Ethereum client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// 20-byte hex address, stored without prefix.
    EthereumHex(String),
    /// Anything else, passed to the node unchanged.
    QtumNative(String),
}

impl Address {
    pub fn classify(s: &str) -> Self {
        if is_ethereum_hex_address(s) {
            Address::EthereumHex(strip_hex_prefix(s).to_string())
        } else {
            Address::QtumNative(s.to_string())
        }
    }

    /// Produce the native address, consulting the resolver only for hex input.
    pub async fn into_native(self, resolver: &dyn AddressResolver) -> Result<String, ResolverError> {
        match self {
            Address::EthereumHex(hex) => resolver.resolve_to_native(&hex).await,
            Address::QtumNative(native) => Ok(native),
        }
    }
}
