//! Key loading and transaction signing.
//!
//! # Security
//! - Keys come from the configuration store only
//! - Keys are never logged or serialized; `Debug` shows the address

use alloy::consensus::{SignableTransaction, TxLegacy};
use alloy::network::TxSignerSync;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::transaction::SignedTrade;
use crate::blockchain::types::WalletError;

/// A single signing key.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// Accepts the key with or without a `0x` prefix. Leading zero digits of
    /// the key itself are significant and kept.
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, WalletError> {
        let trimmed = private_key_hex.trim();
        let key_hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| WalletError::InvalidKey(format!("{}", e)))?;

        tracing::debug!(address = %signer.address(), "Wallet loaded");

        Ok(Self { signer })
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign a legacy transaction.
    ///
    /// A transaction carrying a chain id is signed under EIP-155, binding the
    /// chain id into `v`. Signing is deterministic (RFC 6979).
    pub fn sign_legacy(&self, mut tx: TxLegacy) -> Result<SignedTrade, WalletError> {
        let signature = self
            .signer
            .sign_transaction_sync(&mut tx)
            .map_err(|e| WalletError::Signing(e.to_string()))?;

        Ok(SignedTrade::new(tx.into_signed(signature)))
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
