//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to the node:
//!     → timeouts.rs (enforce per-call deadline)
//!     → On failure: surface the error, the attempt ends
//! ```
//!
//! # Design Decisions
//! - Every external call has a deadline
//! - Nothing is retried: a transaction attempt either completes or is re-run
//!   by the operator from scratch

pub mod timeouts;

pub use timeouts::with_deadline;
