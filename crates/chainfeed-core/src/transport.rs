//! The `BlockTransport` trait, the publish port every backend implements.

use async_trait::async_trait;
use std::fmt;

use crate::error::TransportError;
use crate::record::CodeRecord;

/// Backend acknowledgment for one delivered entry
/// (Redis stream entry id, Pub/Sub message id).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeliveryId(pub String);

impl DeliveryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Publish port for block and contract-code events.
///
/// Both calls resolve only once the backend has acknowledged the entry.
/// Implementations never retry internally and never drop an error.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; one instance is shared by every
/// publish call for the lifetime of the process.
///
/// # Object Safety
/// The trait is object-safe and can be stored as `Arc<dyn BlockTransport>`.
#[async_trait]
pub trait BlockTransport: Send + Sync + 'static {
    /// Append one code record to the `block-code` channel.
    async fn append_code(&self, code: &CodeRecord) -> Result<DeliveryId, TransportError>;

    /// Publish one canonically encoded block to the `block-transactions` channel.
    async fn publish_block(
        &self,
        block_hash: &str,
        payload: &[u8],
    ) -> Result<DeliveryId, TransportError>;

    /// Transport identifier for logs and errors.
    fn name(&self) -> &str;

    /// Release the underlying client. Calls after shutdown may fail.
    async fn shutdown(&self) -> Result<(), TransportError> {
        Ok(())
    }
}
