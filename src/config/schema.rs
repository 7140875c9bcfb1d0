//! Configuration schema definitions.
//!
//! The store is string-typed: every trade field arrives as text and is
//! interpreted by the resolution pipeline, which owns the rules for empty,
//! zero and malformed values.

use serde::Deserialize;

/// Everything one invocation reads from the store.
#[derive(Debug, Clone, Default)]
pub struct ToolboxConfig {
    pub trade: TradeConfig,
    pub settings: Settings,
}

/// Raw transaction intent, as stored.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct TradeConfig {
    /// JSON-RPC endpoint.
    #[serde(rename = "network")]
    pub network: String,

    /// Hex signing key, optional `0x`.
    #[serde(rename = "privatekey")]
    pub private_key: String,

    /// Recipient address.
    pub to: String,

    /// Quantity to send, in `amount_unit` (wei when empty).
    pub amount: String,

    /// Denomination of `amount`.
    #[serde(rename = "amountuint")]
    pub amount_unit: String,

    /// Empty or `0` resolves from the pending nonce.
    pub nonce: String,

    /// Wei per gas. Empty resolves from the node's suggestion.
    #[serde(rename = "gasprice")]
    pub gas_price: String,

    /// Empty or `0` resolves by estimation.
    #[serde(rename = "gaslimit")]
    pub gas_limit: String,

    /// Raw text, or `0x`-prefixed hex.
    pub data: String,
}

impl std::fmt::Debug for TradeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.private_key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("TradeConfig")
            .field("network", &self.network)
            .field("private_key", &key)
            .field("to", &self.to)
            .field("amount", &self.amount)
            .field("amount_unit", &self.amount_unit)
            .field("nonce", &self.nonce)
            .field("gas_price", &self.gas_price)
            .field("gas_limit", &self.gas_limit)
            .field("data", &self.data)
            .finish()
    }
}

/// Ambient settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Deadline for each RPC request in seconds.
    pub rpc_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    pub log_level: String,
}

impl Settings {
    pub const RPC_TIMEOUT_KEY: &'static str = "rpctimeoutsecs";
    pub const LOG_LEVEL_KEY: &'static str = "loglevel";
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rpc_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}
