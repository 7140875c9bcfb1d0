//! Shared utilities for integration testing.

use alloy::consensus::TxLegacy;
use alloy::primitives::{Address, TxHash};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use tx_toolbox::blockchain::{CallParams, ChainClient, ChainError, ChainId, ChainResult, Connector, SignedTrade};
use tx_toolbox::config::TradeConfig;

/// Anvil's first development key.
pub const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
/// Address derived from [`DEV_KEY`], lowercased.
pub const DEV_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

/// Scripted node answers.
#[derive(Debug, Clone)]
pub struct NodeScript {
    pub chain_id: u64,
    pub pending_nonce: u64,
    pub gas_price: u128,
    pub estimate: u64,
    /// Call that fails with `node_error`, by [`ChainClient`] method name.
    pub fail_on: Option<&'static str>,
    pub node_error: String,
}

impl NodeScript {
    /// Default answers, except `call` fails with `message`.
    pub fn failing(call: &'static str, message: &str) -> Self {
        Self {
            fail_on: Some(call),
            node_error: message.to_string(),
            ..Default::default()
        }
    }
}

impl Default for NodeScript {
    fn default() -> Self {
        Self {
            chain_id: 1,
            pending_nonce: 7,
            gas_price: 20_000_000_000,
            estimate: 21_000,
            fail_on: None,
            node_error: String::new(),
        }
    }
}

/// What the mock node saw.
#[derive(Debug, Default)]
pub struct NodeLog {
    pub calls: Vec<&'static str>,
    pub estimates: Vec<CallParams>,
    pub sent: Vec<(TxHash, TxLegacy)>,
}

/// In-memory [`ChainClient`]. Clones share one log.
#[derive(Debug, Clone, Default)]
pub struct MockChain {
    pub script: NodeScript,
    pub log: Arc<Mutex<NodeLog>>,
}

impl MockChain {
    pub fn calls(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().calls.clone()
    }

    pub fn sent(&self) -> Vec<(TxHash, TxLegacy)> {
        self.log.lock().unwrap().sent.clone()
    }

    /// Log the call, then fail it if the script says so.
    fn record(&self, call: &'static str) -> ChainResult<()> {
        self.log.lock().unwrap().calls.push(call);
        if self.script.fail_on == Some(call) {
            return Err(ChainError::Rpc {
                op: call,
                message: self.script.node_error.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn chain_id(&self) -> ChainResult<ChainId> {
        self.record("chain_id")?;
        Ok(ChainId(self.script.chain_id))
    }

    async fn pending_nonce(&self, _address: Address) -> ChainResult<u64> {
        self.record("pending_nonce")?;
        Ok(self.script.pending_nonce)
    }

    async fn suggest_gas_price(&self) -> ChainResult<u128> {
        self.record("suggest_gas_price")?;
        Ok(self.script.gas_price)
    }

    async fn estimate_gas(&self, call: &CallParams) -> ChainResult<u64> {
        self.record("estimate_gas")?;
        self.log.lock().unwrap().estimates.push(call.clone());
        Ok(self.script.estimate)
    }

    async fn send_transaction(&self, tx: &SignedTrade) -> ChainResult<TxHash> {
        self.record("send_transaction")?;
        self.log.lock().unwrap().sent.push((tx.hash(), tx.tx().clone()));
        Ok(tx.hash())
    }
}

/// Hands out clones of one [`MockChain`] and counts connections.
#[derive(Debug, Default)]
pub struct MockConnector {
    pub chain: MockChain,
    pub endpoints: Mutex<Vec<String>>,
}

impl MockConnector {
    pub fn new(script: NodeScript) -> Self {
        Self {
            chain: MockChain {
                script,
                ..Default::default()
            },
            endpoints: Mutex::new(Vec::new()),
        }
    }

    pub fn connections(&self) -> usize {
        self.endpoints.lock().unwrap().len()
    }
}

#[async_trait]
impl Connector for MockConnector {
    type Client = MockChain;

    async fn connect(&self, endpoint: &str) -> ChainResult<MockChain> {
        self.endpoints.lock().unwrap().push(endpoint.to_string());
        Ok(self.chain.clone())
    }
}

/// A config that resolves without errors against the default script.
pub fn trade_config() -> TradeConfig {
    TradeConfig {
        network: "http://localhost:8545".to_string(),
        private_key: DEV_KEY.to_string(),
        to: RECIPIENT.to_string(),
        amount: "1".to_string(),
        amount_unit: "ether".to_string(),
        ..Default::default()
    }
}
