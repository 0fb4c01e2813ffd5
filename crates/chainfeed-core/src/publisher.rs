//! `FeedPublisher`: build, encode, and publish under a deadline.
//!
//! This is the one entry point the node calls: once per finalized block and
//! once per newly observed contract. Fatal failures (sender recovery,
//! encoding, malformed block) and recoverable ones (transport publish) are
//! both returned; the host owns the retry/skip/halt policy.

use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::builder::build_block_record;
use crate::chain::{Block, ChainTransaction};
use crate::channel::{BLOCK_CODE, BLOCK_TRANSACTIONS};
use crate::encoder::encode_block;
use crate::error::{FeedError, TransportError};
use crate::record::{BlockRecord, CodeRecord};
use crate::signer::SenderRecovery;
use crate::transport::{BlockTransport, DeliveryId};

/// Deadline applied to every publish/append call unless overridden.
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(10);

/// Publishes normalized blocks and code records through a shared transport.
pub struct FeedPublisher {
    transport: Arc<dyn BlockTransport>,
    publish_timeout: Duration,
}

impl FeedPublisher {
    pub fn new(transport: Arc<dyn BlockTransport>) -> Self {
        Self {
            transport,
            publish_timeout: DEFAULT_PUBLISH_TIMEOUT,
        }
    }

    /// Override the per-call publish deadline.
    pub fn with_timeout(mut self, publish_timeout: Duration) -> Self {
        self.publish_timeout = publish_timeout;
        self
    }

    pub fn transport(&self) -> &Arc<dyn BlockTransport> {
        &self.transport
    }

    /// Normalize, encode, and publish one finalized block.
    ///
    /// Nothing is published unless every transaction normalized.
    pub async fn publish_block<T, R, S>(
        &self,
        block: &Block<T>,
        receipts: &[R],
        signer: &S,
    ) -> Result<DeliveryId, FeedError>
    where
        T: ChainTransaction,
        R: Serialize,
        S: SenderRecovery<T> + ?Sized,
    {
        let record = build_block_record(block, receipts, signer).map_err(|e| {
            error!(block = block.number(), error = %e, "block normalization failed");
            e
        })?;
        self.publish_record(&record).await
    }

    /// Encode and publish an already built record.
    pub async fn publish_record(&self, record: &BlockRecord) -> Result<DeliveryId, FeedError> {
        let payload = encode_block(record).map_err(|e| {
            error!(block = %record.number, error = %e, "block encoding failed");
            e
        })?;

        let result = self
            .with_deadline(self.transport.publish_block(&record.hash, &payload))
            .await;

        match result {
            Ok(id) => {
                info!(
                    block = %record.number,
                    hash = %record.hash,
                    txs = record.tx_count(),
                    bytes = payload.len(),
                    id = %id,
                    "block published"
                );
                Ok(id)
            }
            Err(source) => {
                warn!(
                    block = %record.number,
                    hash = %record.hash,
                    transport = self.transport.name(),
                    error = %source,
                    "block publish failed"
                );
                Err(FeedError::TransportPublish {
                    channel: BLOCK_TRANSACTIONS.to_string(),
                    key: record.hash.clone(),
                    source,
                })
            }
        }
    }

    /// Append one contract code record to the code channel.
    pub async fn append_code(&self, record: &CodeRecord) -> Result<DeliveryId, FeedError> {
        match self.with_deadline(self.transport.append_code(record)).await {
            Ok(id) => {
                debug!(hash = %record.hash, bytes = record.code.len(), id = %id, "code appended");
                Ok(id)
            }
            Err(source) => {
                warn!(
                    hash = %record.hash,
                    transport = self.transport.name(),
                    error = %source,
                    "code append failed"
                );
                Err(FeedError::TransportPublish {
                    channel: BLOCK_CODE.to_string(),
                    key: record.hash.clone(),
                    source,
                })
            }
        }
    }

    /// Release the transport.
    pub async fn shutdown(&self) -> Result<(), TransportError> {
        info!(transport = self.transport.name(), "shutting down transport");
        self.transport.shutdown().await
    }

    async fn with_deadline<F>(&self, call: F) -> Result<DeliveryId, TransportError>
    where
        F: Future<Output = Result<DeliveryId, TransportError>>,
    {
        match tokio::time::timeout(self.publish_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout {
                ms: self.publish_timeout.as_millis() as u64,
            }),
        }
    }
}
