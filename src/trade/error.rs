//! Error taxonomy for a transaction attempt.

use thiserror::Error;

use crate::blockchain::types::{ChainError, WalletError};

/// A missing or malformed configuration field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("netWork is empty")]
    EmptyNetwork,

    #[error("privateKey is empty")]
    EmptyPrivateKey,

    #[error("to address is empty")]
    EmptyRecipient,

    #[error("to address <{0}> is not a 20-byte hex address")]
    MalformedRecipient(String),

    #[error("to address is the zero address")]
    ZeroRecipient,

    #[error("amount <{0}> is not a non-negative number")]
    InvalidAmount(String),

    #[error("the default unit is wei, amount <{0}> must be a whole number")]
    FractionalBaseAmount(String),

    #[error("amount {amount} {unit} is not a whole number of wei")]
    SubWeiAmount { amount: String, unit: String },

    #[error("amount <{0}> does not fit in 256 bits of wei")]
    AmountOutOfRange(String),

    #[error("invalid {field} <{value}>")]
    InvalidNumber { field: &'static str, value: String },

    #[error("failed to decode data: {0}")]
    InvalidData(String),
}

/// Terminal outcome of a failed attempt.
#[derive(Debug, Error)]
pub enum TradeError {
    /// Bad input; raised before any further network call.
    #[error("configuration error: {0}")]
    Config(#[from] InputError),

    /// Transport or node failure, with the node's text intact.
    #[error("network error: {0}")]
    Network(#[from] ChainError),

    /// Key parsing or signature construction failed. Nothing was broadcast.
    #[error("signing error: {0}")]
    Signing(#[from] WalletError),

    /// A field needed later was never resolved.
    #[error("transaction is incomplete: {0} not resolved")]
    Incomplete(&'static str),

    /// Reading the operator's answer failed.
    #[error("operator I/O failed: {0}")]
    Operator(#[from] std::io::Error),
}

/// Result type for trade operations.
pub type TradeResult<T> = Result<T, TradeError>;
