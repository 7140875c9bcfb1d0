//! Blockchain RPC client with per-call deadlines.
//!
//! # Responsibilities
//! - Connect to a JSON-RPC endpoint
//! - Query the facts a transfer needs (chain id, pending nonce, gas)
//! - Broadcast signed transactions
//! - Keep node error text intact for the operator

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::blockchain::transaction::SignedTrade;
use crate::blockchain::types::{CallParams, ChainError, ChainId, ChainResult};
use crate::resilience::with_deadline;

/// The node operations the trade pipeline depends on.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// `eth_chainId`.
    async fn chain_id(&self) -> ChainResult<ChainId>;

    /// `eth_getTransactionCount` at the pending block.
    async fn pending_nonce(&self, address: Address) -> ChainResult<u64>;

    /// `eth_gasPrice`.
    async fn suggest_gas_price(&self) -> ChainResult<u128>;

    /// `eth_estimateGas` for the given call.
    async fn estimate_gas(&self, call: &CallParams) -> ChainResult<u64>;

    /// `eth_sendRawTransaction`. Returns the hash the node accepted.
    async fn send_transaction(&self, tx: &SignedTrade) -> ChainResult<TxHash>;
}

/// Opens a [`ChainClient`] for an endpoint string.
#[async_trait]
pub trait Connector: Send + Sync {
    type Client: ChainClient;

    async fn connect(&self, endpoint: &str) -> ChainResult<Self::Client>;
}

/// JSON-RPC client over HTTP.
#[derive(Clone)]
pub struct RpcClient {
    provider: Arc<dyn Provider + Send + Sync>,
    endpoint: url::Url,
    /// Deadline applied to each request.
    timeout_duration: Duration,
}

impl RpcClient {
    /// Create a client for `endpoint`.
    ///
    /// No request is made here; the first call reveals whether the node is
    /// reachable.
    pub fn new(endpoint: &str, timeout_duration: Duration) -> ChainResult<Self> {
        let invalid = |reason: String| ChainError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason,
        };

        let url: url::Url = endpoint.trim().parse().map_err(|e: url::ParseError| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "unsupported scheme '{}', expected http or https",
                url.scheme()
            )));
        }

        let provider =
            Arc::new(ProviderBuilder::new().connect_http(url.clone())) as Arc<dyn Provider + Send + Sync>;

        tracing::debug!(
            rpc_url = %url,
            timeout_secs = timeout_duration.as_secs(),
            "RPC client created"
        );

        Ok(Self {
            provider,
            endpoint: url,
            timeout_duration,
        })
    }

    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChainClient for RpcClient {
    async fn chain_id(&self) -> ChainResult<ChainId> {
        with_deadline("eth_chainId", self.timeout_duration, self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    async fn pending_nonce(&self, address: Address) -> ChainResult<u64> {
        with_deadline(
            "eth_getTransactionCount",
            self.timeout_duration,
            self.provider.get_transaction_count(address).pending(),
        )
        .await
    }

    async fn suggest_gas_price(&self) -> ChainResult<u128> {
        with_deadline("eth_gasPrice", self.timeout_duration, self.provider.get_gas_price()).await
    }

    async fn estimate_gas(&self, call: &CallParams) -> ChainResult<u64> {
        let request = TransactionRequest::default()
            .with_from(call.from)
            .with_to(call.to)
            .with_gas_price(call.gas_price)
            .with_value(call.value)
            .with_input(call.data.clone());

        with_deadline("eth_estimateGas", self.timeout_duration, self.provider.estimate_gas(request)).await
    }

    async fn send_transaction(&self, tx: &SignedTrade) -> ChainResult<TxHash> {
        let pending = with_deadline(
            "eth_sendRawTransaction",
            self.timeout_duration,
            self.provider.send_raw_transaction(tx.encoded()),
        )
        .await?;
        Ok(*pending.tx_hash())
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("rpc_url", &self.endpoint.as_str())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

/// Connects [`RpcClient`]s with a fixed per-call deadline.
#[derive(Debug, Clone)]
pub struct RpcConnector {
    timeout_duration: Duration,
}

impl RpcConnector {
    pub fn new(timeout_duration: Duration) -> Self {
        Self { timeout_duration }
    }
}

#[async_trait]
impl Connector for RpcConnector {
    type Client = RpcClient;

    async fn connect(&self, endpoint: &str) -> ChainResult<RpcClient> {
        RpcClient::new(endpoint, self.timeout_duration)
    }
}
