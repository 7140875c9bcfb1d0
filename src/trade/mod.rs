//! Transaction attempt: resolve, confirm, sign, confirm, broadcast.
//!
//! # Data Flow
//! ```text
//! TradeConfig
//!     → pipeline.rs (ordered stages fill the TradeDescriptor)
//!     → operator gate #1 ("Start transaction?")
//!     → submit.rs (legacy tx, EIP-155 signature, hash shown)
//!     → operator gate #2 ("Send transaction?")
//!     → ChainClient::send_transaction
//! ```
//!
//! # Design Decisions
//! - One attempt per invocation; the descriptor is never shared
//! - Any error ends the attempt, nothing is retried
//! - A "no" at either gate is a normal outcome, not an error

pub mod descriptor;
pub mod error;
pub mod operator;
pub mod pipeline;
pub mod submit;

pub use descriptor::TradeDescriptor;
pub use error::{InputError, TradeError, TradeResult};
pub use operator::{Operator, ScriptedOperator, TerminalOperator};
pub use pipeline::{Gate, Pipeline, Resolved, Stage};
pub use submit::{sign, sign_and_submit, TradeOutcome};

use crate::blockchain::client::Connector;
use crate::config::TradeConfig;

/// Run one complete attempt.
pub async fn run<K: Connector>(
    connector: &K,
    config: &TradeConfig,
    operator: &mut dyn Operator,
) -> TradeResult<TradeOutcome> {
    let resolved = match Pipeline::new(connector).resolve(config, operator).await? {
        Gate::Proceed(resolved) => resolved,
        Gate::Declined => return Ok(TradeOutcome::Declined),
    };
    sign_and_submit(&resolved.descriptor, &resolved.client, operator).await
}
