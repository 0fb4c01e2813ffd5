//! Canonical encoder: JSON with stable field names.
//!
//! - U256 values are base-10 strings (full magnitude)
//! - byte sequences are `0x`-prefixed lowercase hex
//! - hashes are `0x` hex, addresses EIP-55 checksummed
//!
//! The decoders are the exact inverses and are what consumers run.

use bytes::Bytes;

use crate::error::FeedError;
use crate::record::{BlockRecord, CodeRecord};

/// Encode a block record for the `block-transactions` channel.
pub fn encode_block(record: &BlockRecord) -> Result<Bytes, FeedError> {
    serde_json::to_vec(record)
        .map(Bytes::from)
        .map_err(|source| FeedError::Encoding {
            what: "block",
            source,
        })
}

/// Encode a code record as a self-contained document (`hash` + hex `data`).
pub fn encode_code(record: &CodeRecord) -> Result<Bytes, FeedError> {
    serde_json::to_vec(record)
        .map(Bytes::from)
        .map_err(|source| FeedError::Encoding {
            what: "code",
            source,
        })
}

pub fn decode_block(payload: &[u8]) -> Result<BlockRecord, FeedError> {
    serde_json::from_slice(payload).map_err(|source| FeedError::Encoding {
        what: "block",
        source,
    })
}

pub fn decode_code(payload: &[u8]) -> Result<CodeRecord, FeedError> {
    serde_json::from_slice(payload).map_err(|source| FeedError::Encoding {
        what: "code",
        source,
    })
}
