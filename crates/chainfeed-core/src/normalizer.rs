//! Converts a chain transaction plus its recovered sender into a
//! [`TransactionRecord`].

use crate::chain::ChainTransaction;
use crate::error::FeedError;
use crate::record::{hex_string, TransactionRecord};
use crate::signer::SenderRecovery;

/// Normalize one transaction.
///
/// Fails with [`FeedError::SignatureRecovery`] if the sender cannot be
/// recovered; a record without a sender is never produced.
pub fn normalize_transaction<T, S>(tx: &T, signer: &S) -> Result<TransactionRecord, FeedError>
where
    T: ChainTransaction,
    S: SenderRecovery<T> + ?Sized,
{
    let hash = hex_string(tx.hash().as_slice());
    let from = signer
        .recover_sender(tx)
        .map_err(|e| FeedError::SignatureRecovery {
            tx_hash: hash.clone(),
            reason: e.to_string(),
        })?;

    Ok(TransactionRecord {
        from: from.to_checksum(None),
        // Contract creation leaves the recipient empty
        to: tx.to().map(|to| to.to_checksum(None)).unwrap_or_default(),
        tx_type: tx.tx_type(),
        nonce: tx.nonce(),
        gas_limit: tx.gas_limit(),
        gas_price: tx.gas_price(),
        max_fee_per_gas: tx.max_fee_per_gas(),
        max_priority_fee_per_gas: tx.max_priority_fee_per_gas(),
        value: tx.value(),
        hash,
        input: tx.input().clone(),
        size: tx.encoded_size(),
        chain_id: tx.chain_id(),
    })
}
