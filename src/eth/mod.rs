pub mod types;

pub use types::{RpcEnvelope, TransactionReq};
