//! Signing and broadcast of a resolved descriptor.

use alloy::primitives::TxHash;

use crate::blockchain::client::ChainClient;
use crate::blockchain::transaction::SignedTrade;
use crate::blockchain::wallet::Wallet;
use crate::trade::descriptor::TradeDescriptor;
use crate::trade::error::TradeResult;
use crate::trade::operator::Operator;

/// Prompt shown by the second confirmation gate.
pub const SEND_PROMPT: &str = "Send transaction? (Y/y/N/n)";

/// How an attempt ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    /// Declined at the first gate. Nothing was signed.
    Declined,
    /// Signed, then declined at the second gate. Nothing was broadcast.
    Withheld(TxHash),
    /// Accepted by the node.
    Sent(TxHash),
}

/// Build and sign the canonical transaction for `desc`.
pub fn sign(desc: &TradeDescriptor) -> TradeResult<SignedTrade> {
    let fields = desc.transfer_fields()?;
    let wallet = Wallet::from_private_key(desc.private_key())?;
    let signed = wallet.sign_legacy(fields.to_legacy())?;

    tracing::info!(
        tx_hash = %signed.hash(),
        chain_id = fields.chain_id.0,
        nonce = fields.nonce,
        "Transaction signed"
    );
    Ok(signed)
}

/// Sign, show the hash, and broadcast only on an explicit yes.
pub async fn sign_and_submit<C: ChainClient + ?Sized>(
    desc: &TradeDescriptor,
    client: &C,
    operator: &mut dyn Operator,
) -> TradeResult<TradeOutcome> {
    let signed = sign(desc)?;
    let hash = signed.hash();
    operator.show(&format!("<-- Tx hash configuration successful: {} -->", hash))?;

    if !operator.confirm(SEND_PROMPT)? {
        tracing::info!(tx_hash = %hash, "Operator declined broadcast");
        return Ok(TradeOutcome::Withheld(hash));
    }

    let accepted = client.send_transaction(&signed).await?;
    if accepted != hash {
        tracing::warn!(expected = %hash, node = %accepted, "Node reported a different transaction hash");
    }
    tracing::info!(tx_hash = %accepted, "Transaction sent");
    operator.show("<-- Transaction sent -->")?;
    Ok(TradeOutcome::Sent(accepted))
}
