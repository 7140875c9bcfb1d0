//! Resolve, sign and broadcast EVM transactions from a sparse configuration.

pub mod blockchain;
pub mod config;
pub mod display;
pub mod observability;
pub mod resilience;
pub mod trade;
pub mod units;

pub use config::ToolboxConfig;
pub use trade::{TradeDescriptor, TradeError, TradeOutcome};
