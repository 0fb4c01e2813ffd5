//! Assembles a [`BlockRecord`] from a finalized block, its receipts, and a
//! sender-recovery capability.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::chain::{Block, ChainTransaction};
use crate::error::FeedError;
use crate::normalizer::normalize_transaction;
use crate::record::{hex_string, BlockRecord};
use crate::signer::SenderRecovery;

/// Build the canonical record for one block.
///
/// All-or-nothing: if any transaction fails normalization the whole block
/// fails, so a published block always carries either zero transactions or
/// exactly as many as the chain does.
pub fn build_block_record<T, R, S>(
    block: &Block<T>,
    receipts: &[R],
    signer: &S,
) -> Result<BlockRecord, FeedError>
where
    T: ChainTransaction,
    R: Serialize,
    S: SenderRecovery<T> + ?Sized,
{
    let header = &block.header;
    let hash = hex_string(header.hash.as_slice());

    // Receipts are indexed by transaction position
    if !block.transactions.is_empty()
        && !receipts.is_empty()
        && receipts.len() != block.transactions.len()
    {
        return Err(FeedError::InvalidBlock {
            block_hash: hash,
            reason: format!(
                "{} transactions but {} receipts",
                block.transactions.len(),
                receipts.len()
            ),
        });
    }

    let time = i64::try_from(header.timestamp)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or_else(|| FeedError::InvalidBlock {
            block_hash: hash.clone(),
            reason: format!("timestamp {} out of range", header.timestamp),
        })?;

    let transactions = block
        .transactions
        .iter()
        .map(|tx| normalize_transaction(tx, signer))
        .collect::<Result<Vec<_>, _>>()?;

    let receipts = receipts
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| FeedError::Encoding {
            what: "receipts",
            source,
        })?;

    let header_json = serde_json::to_value(header).map_err(|source| FeedError::Encoding {
        what: "header",
        source,
    })?;

    Ok(BlockRecord {
        base_fee: header.base_fee_per_gas,
        bloom: hex_string(header.logs_bloom.as_slice()),
        coinbase: header.beneficiary.to_checksum(None),
        difficulty: header.difficulty,
        extra: header.extra_data.clone(),
        gas_limit: header.gas_limit,
        gas_used: header.gas_used,
        hash,
        header: header_json,
        mix_digest: hex_string(header.mix_hash.as_slice()),
        nonce: hex_string(header.nonce.as_slice()),
        number: header.number.to_string(),
        parent_hash: hex_string(header.parent_hash.as_slice()),
        receipt_hash: hex_string(header.receipts_root.as_slice()),
        root: hex_string(header.state_root.as_slice()),
        size: block.size,
        time,
        transactions,
        receipts,
    })
}
