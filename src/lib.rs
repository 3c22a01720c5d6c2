//! Janus RPC Translation Server
//!
//! This crate accepts Ethereum-compatible JSON-RPC calls and rewrites them
//! into the equivalent Qtum node RPC calls, so standard EVM tooling can drive
//! contracts deployed on Qtum.
//!
//! # Architecture
//!
//! ```text
//! Developer (web3 / ethers.js)
//!     |
//!     | eth_sendTransaction / eth_call
//!     v
//! Janus (this crate): transformer::Manager
//!     |
//!     | sendtocontract / createcontract / callcontract
//!     v
//! Qtum node RPC
//! ```
//!
//! # Modules
//!
//! - `config` - Environment and configuration management
//! - `eth` - Inbound Ethereum request types
//! - `qtum` - Qtum RPC types and HTTP client (also the address resolver)
//! - `transformer` - Method transformers, unit conversion, dispatch
//! - `server` - JSON-RPC server setup and forwarding

pub mod config;
pub mod eth;
pub mod qtum;
pub mod server;
pub mod transformer;
