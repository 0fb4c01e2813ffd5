//! Publish/subscribe topic transport.
//!
//! Messages carry the payload as their body and the block or code hash as
//! the `hash` attribute, so subscribers can filter and dedupe without
//! decoding. Code records are published as self-contained JSON documents.

use async_trait::async_trait;
use chainfeed_core::channel::FIELD_HASH;
use chainfeed_core::{encode_code, BlockTransport, CodeRecord, DeliveryId, TransportError};
use std::collections::HashMap;

use crate::config::TopicConfig;

/// Minimal topic client: publish one message and wait for the server ack.
#[async_trait]
pub trait TopicPublisher: Send + Sync + 'static {
    /// Publish and return the server-assigned message id.
    async fn publish(
        &self,
        topic: &str,
        data: Vec<u8>,
        attributes: HashMap<String, String>,
    ) -> Result<String, TransportError>;

    /// Flush and stop any background publishers.
    async fn close(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// `BlockTransport` over any [`TopicPublisher`].
pub struct TopicTransport<P: TopicPublisher> {
    publisher: P,
    topic: String,
    code_topic: String,
}

impl<P: TopicPublisher> TopicTransport<P> {
    pub fn new(publisher: P, config: &TopicConfig) -> Self {
        Self {
            publisher,
            topic: config.topic.clone(),
            code_topic: config.code_topic.clone(),
        }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn code_topic(&self) -> &str {
        &self.code_topic
    }
}

fn hash_attribute(hash: &str) -> HashMap<String, String> {
    HashMap::from([(FIELD_HASH.to_string(), hash.to_string())])
}

#[async_trait]
impl<P: TopicPublisher> BlockTransport for TopicTransport<P> {
    async fn append_code(&self, code: &CodeRecord) -> Result<DeliveryId, TransportError> {
        let body = encode_code(code).map_err(|e| TransportError::Other(e.to_string()))?;
        let id = self
            .publisher
            .publish(&self.code_topic, body.to_vec(), hash_attribute(&code.hash))
            .await?;
        Ok(DeliveryId(id))
    }

    async fn publish_block(
        &self,
        block_hash: &str,
        payload: &[u8],
    ) -> Result<DeliveryId, TransportError> {
        let id = self
            .publisher
            .publish(&self.topic, payload.to_vec(), hash_attribute(block_hash))
            .await?;
        Ok(DeliveryId(id))
    }

    fn name(&self) -> &str {
        "pubsub-topic"
    }

    async fn shutdown(&self) -> Result<(), TransportError> {
        self.publisher.close().await
    }
}
