//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!
//! Consumers:
//!     → stderr (fmt layer), filtered per module
//! ```
//!
//! # Design Decisions
//! - Structured fields (chain_id, nonce, tx_hash), never key material
//! - Operator-facing progress is not logging; it goes through `Operator`

pub mod logging;
