//! Append-only stream transport.
//!
//! Each channel maps to one stream. Entries are field/value maps:
//!
//! | stream               | fields                          |
//! |----------------------|---------------------------------|
//! | `block-code`         | `hash` (0x hex), `data` (raw bytecode) |
//! | `block-transactions` | `data` (canonical JSON block)   |

use async_trait::async_trait;
use chainfeed_core::channel::{BLOCK_CODE, BLOCK_TRANSACTIONS, FIELD_DATA, FIELD_HASH};
use chainfeed_core::{BlockTransport, CodeRecord, DeliveryId, TransportError};

/// Minimal stream client: one `XADD`-style append with a server-assigned id.
#[async_trait]
pub trait StreamClient: Send + Sync + 'static {
    /// Append one entry and return the id the server assigned to it.
    async fn append(
        &self,
        stream: &str,
        fields: &[(&str, &[u8])],
    ) -> Result<String, TransportError>;

    async fn close(&self) -> Result<(), TransportError> {
        Ok(())
    }

    /// Backend identifier reported by the transport.
    fn name(&self) -> &str {
        "stream"
    }
}

/// `BlockTransport` over any [`StreamClient`].
pub struct StreamTransport<C: StreamClient> {
    client: C,
}

impl<C: StreamClient> StreamTransport<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: StreamClient> BlockTransport for StreamTransport<C> {
    async fn append_code(&self, code: &CodeRecord) -> Result<DeliveryId, TransportError> {
        let fields: [(&str, &[u8]); 2] = [
            (FIELD_HASH, code.hash.as_bytes()),
            (FIELD_DATA, &code.code[..]),
        ];
        let id = self.client.append(BLOCK_CODE, &fields).await?;
        Ok(DeliveryId(id))
    }

    async fn publish_block(
        &self,
        _block_hash: &str,
        payload: &[u8],
    ) -> Result<DeliveryId, TransportError> {
        let id = self
            .client
            .append(BLOCK_TRANSACTIONS, &[(FIELD_DATA, payload)])
            .await?;
        Ok(DeliveryId(id))
    }

    fn name(&self) -> &str {
        self.client.name()
    }

    async fn shutdown(&self) -> Result<(), TransportError> {
        self.client.close().await
    }
}
