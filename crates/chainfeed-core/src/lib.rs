//! # chainfeed-core
//!
//! Normalization and publish pipeline for finalized EVM blocks.
//!
//! The node hands over each finalized block together with its receipts and a
//! sender-recovery capability. The core turns it into a canonical
//! [`BlockRecord`], serializes it with the canonical encoder, and hands the
//! bytes to a [`BlockTransport`]. Newly deployed contract code takes a
//! shorter path straight to the transport's code channel.
//!
//! ## Architecture
//! ```text
//! Block<T> + receipts + SenderRecovery
//!       │
//!       ▼
//! build_block_record ──► normalize_transaction (per tx, block order)
//!       │
//!       ▼
//! encode_block (JSON, stable field names)
//!       │
//!       ▼
//! BlockTransport::publish_block   ← Redis Streams / Pub/Sub
//!
//! CodeRecord ──► BlockTransport::append_code
//! ```

pub mod builder;
pub mod chain;
pub mod channel;
pub mod encoder;
pub mod error;
pub mod normalizer;
pub mod publisher;
pub mod record;
pub mod signer;
pub mod transport;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::build_block_record;
pub use chain::{Block, BlockHeader, ChainTransaction, SignedTransaction, TxSignature};
pub use encoder::{decode_block, decode_code, encode_block, encode_code};
pub use error::{FeedError, TransportError};
pub use normalizer::normalize_transaction;
pub use publisher::{FeedPublisher, DEFAULT_PUBLISH_TIMEOUT};
pub use record::{BlockRecord, CodeRecord, TransactionRecord};
pub use signer::{EcdsaRecovery, RecoveryError, SenderRecovery};
pub use transport::{BlockTransport, DeliveryId};
