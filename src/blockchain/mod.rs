//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Config store (private key, RPC endpoint)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with deadlines)
//!     → transaction.rs (canonical legacy tx, signed artifact)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{ChainClient, Connector, RpcClient, RpcConnector};
pub use transaction::{SignedTrade, TransferFields};
pub use types::{CallParams, ChainError, ChainId, ChainResult, WalletError};
pub use wallet::Wallet;
