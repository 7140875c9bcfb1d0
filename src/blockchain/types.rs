//! Chain-facing types and error definitions.

use alloy::primitives::{Address, Bytes, U256};
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur while talking to a node.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Endpoint string is not a usable RPC URL.
    #[error("invalid RPC endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The node or the transport rejected the request. `message` is verbatim.
    #[error("{op} failed: {message}")]
    Rpc { op: &'static str, message: String },

    /// The request did not complete within the configured deadline.
    #[error("{op} timed out after {secs} seconds")]
    Timeout { op: &'static str, secs: u64 },
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Key handling and signature failures. Never carries key material.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Key is not a valid secp256k1 scalar in hex.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// Signature construction failed.
    #[error("signature transaction failed: {0}")]
    Signing(String),
}

/// Parameters for simulating the transfer during gas estimation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallParams {
    pub from: Address,
    pub to: Address,
    pub gas_price: u128,
    pub value: U256,
    pub data: Bytes,
}
