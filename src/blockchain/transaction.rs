//! Canonical transaction construction and the signed artifact.
//!
//! # Responsibilities
//! - Build the legacy transaction a transfer needs
//! - Hold the signed transaction, its hash and its raw encoding

use alloy::consensus::{Signed, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, Signature, TxHash, TxKind, U256};

use crate::blockchain::types::ChainId;

/// Every field of a value transfer, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFields {
    pub chain_id: ChainId,
    pub nonce: u64,
    pub to: Address,
    pub value: U256,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub data: Bytes,
}

impl TransferFields {
    /// The unsigned legacy transaction. Carrying the chain id makes it
    /// EIP-155 replay protected once signed.
    pub fn to_legacy(&self) -> TxLegacy {
        TxLegacy {
            chain_id: Some(self.chain_id.0),
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: TxKind::Call(self.to),
            value: self.value,
            input: self.data.clone(),
        }
    }
}

/// A signed transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone)]
pub struct SignedTrade {
    signed: Signed<TxLegacy>,
    encoded: Bytes,
}

impl SignedTrade {
    pub fn new(signed: Signed<TxLegacy>) -> Self {
        let encoded = TxEnvelope::from(signed.clone()).encoded_2718().into();
        Self { signed, encoded }
    }

    /// Transaction hash, known before anything is broadcast.
    pub fn hash(&self) -> TxHash {
        *self.signed.hash()
    }

    /// Raw RLP bytes.
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    pub fn tx(&self) -> &TxLegacy {
        self.signed.tx()
    }

    pub fn signature(&self) -> &Signature {
        self.signed.signature()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::wallet::Wallet;
    use alloy::consensus::SignableTransaction;
    use alloy::primitives::address;

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn fields() -> TransferFields {
        TransferFields {
            chain_id: ChainId(1),
            nonce: 3,
            to: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
            value: U256::from(1_000_000_000_000_000u64),
            gas_limit: 21_000,
            gas_price: 20_000_000_000,
            data: Bytes::new(),
        }
    }

    #[test]
    fn test_legacy_carries_every_field() {
        let tx = fields().to_legacy();
        assert_eq!(tx.chain_id, Some(1));
        assert_eq!(tx.nonce, 3);
        assert_eq!(tx.gas_limit, 21_000);
        assert_eq!(tx.gas_price, 20_000_000_000);
        assert_eq!(tx.to, TxKind::Call(fields().to));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let a = wallet.sign_legacy(fields().to_legacy()).unwrap();
        let b = wallet.sign_legacy(fields().to_legacy()).unwrap();
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a.encoded(), b.encoded());
    }

    #[test]
    fn test_chain_id_changes_hash() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let mainnet = wallet.sign_legacy(fields().to_legacy()).unwrap();
        let mut other = fields();
        other.chain_id = ChainId(5);
        let goerli = wallet.sign_legacy(other.to_legacy()).unwrap();
        assert_ne!(mainnet.hash(), goerli.hash());
    }

    #[test]
    fn test_signature_recovers_sender() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let signed = wallet.sign_legacy(fields().to_legacy()).unwrap();
        let prehash = signed.tx().signature_hash();
        let recovered = signed.signature().recover_address_from_prehash(&prehash).unwrap();
        assert_eq!(recovered, wallet.address());
    }

    #[test]
    fn test_encoding_is_legacy_rlp() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let signed = wallet.sign_legacy(fields().to_legacy()).unwrap();
        // legacy transactions are a bare RLP list, no type byte
        assert!(signed.encoded()[0] >= 0xc0);
        assert_eq!(signed.hash(), alloy::primitives::keccak256(signed.encoded()));
    }
}
