//! Timeout enforcement.
//!
//! Every node call runs under a deadline. A call that does not finish in
//! time is reported as a [`ChainError::Timeout`], distinct from a node
//! rejection, and the in-flight request is dropped.

use std::fmt::Display;
use std::future::IntoFuture;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{ChainError, ChainResult};

/// Await `call` for at most `deadline`, mapping failures onto [`ChainError`].
///
/// `op` names the RPC method for logs and error messages. Node errors keep
/// their text verbatim so diagnostics like "nonce too low" reach the operator.
pub async fn with_deadline<F, T, E>(op: &'static str, deadline: Duration, call: F) -> ChainResult<T>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: Display,
{
    match timeout(deadline, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            tracing::warn!(op, error = %e, "RPC error");
            Err(ChainError::Rpc {
                op,
                message: e.to_string(),
            })
        }
        Err(_) => {
            tracing::warn!(op, deadline_secs = deadline.as_secs(), "RPC timeout");
            Err(ChainError::Timeout {
                op,
                secs: deadline.as_secs(),
            })
        }
    }
}
