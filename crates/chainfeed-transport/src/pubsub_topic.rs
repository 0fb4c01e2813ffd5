//! Google Cloud Pub/Sub client.
//!
//! Credentials come from the environment (`GOOGLE_APPLICATION_CREDENTIALS`,
//! metadata server, or emulator via `PUBSUB_EMULATOR_HOST`).

use async_trait::async_trait;
use chainfeed_core::{FeedError, TransportError};
use google_cloud_googleapis::pubsub::v1::PubsubMessage;
use google_cloud_pubsub::client::{Client, ClientConfig};
use google_cloud_pubsub::publisher::Publisher;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::TopicConfig;
use crate::topic::{TopicPublisher, TopicTransport};

/// One publisher per configured topic, created at connect time.
pub struct PubSubTopicClient {
    project_id: String,
    publishers: HashMap<String, Publisher>,
}

impl PubSubTopicClient {
    /// Authenticate, check that both topics exist, and start publishers.
    pub async fn connect(config: &TopicConfig) -> Result<Self, FeedError> {
        let client_config = ClientConfig::default()
            .with_auth()
            .await
            .map_err(|e| construction_error(format!("authentication failed: {e}")))?;
        let client_config = ClientConfig {
            project_id: Some(config.project_id.clone()),
            ..client_config
        };
        let client = Client::new(client_config)
            .await
            .map_err(|e| construction_error(e.to_string()))?;

        let mut publishers = HashMap::new();
        for name in [&config.topic, &config.code_topic] {
            let topic = client.topic(name);
            let exists = topic
                .exists(None)
                .await
                .map_err(|e| construction_error(format!("topic '{name}': {e}")))?;
            if !exists {
                return Err(construction_error(format!(
                    "topic '{name}' does not exist in project '{}'",
                    config.project_id
                )));
            }
            publishers.insert(name.clone(), topic.new_publisher(None));
        }

        debug!(
            project = %config.project_id,
            topic = %config.topic,
            code_topic = %config.code_topic,
            "pubsub publishers ready"
        );
        Ok(Self {
            project_id: config.project_id.clone(),
            publishers,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }
}

#[async_trait]
impl TopicPublisher for PubSubTopicClient {
    async fn publish(
        &self,
        topic: &str,
        data: Vec<u8>,
        attributes: HashMap<String, String>,
    ) -> Result<String, TransportError> {
        let publisher = self
            .publishers
            .get(topic)
            .ok_or_else(|| TransportError::Other(format!("no publisher for topic '{topic}'")))?;

        let message = PubsubMessage {
            data,
            attributes,
            ..Default::default()
        };
        let awaiter = publisher.publish(message).await;
        awaiter
            .get()
            .await
            .map_err(|status| classify(status.code() as i32, &status.to_string()))
    }

    async fn close(&self) -> Result<(), TransportError> {
        for (topic, publisher) in &self.publishers {
            let mut publisher = publisher.clone();
            publisher.shutdown().await;
            debug!(topic = %topic, "publisher stopped");
        }
        Ok(())
    }
}

impl TopicTransport<PubSubTopicClient> {
    /// Connect to Pub/Sub and wrap the client as a `BlockTransport`.
    pub async fn connect(config: &TopicConfig) -> Result<Self, FeedError> {
        let client = PubSubTopicClient::connect(config).await.map_err(|e| {
            warn!(project = %config.project_id, error = %e, "pubsub connect failed");
            e
        })?;
        Ok(Self::new(client, config))
    }
}

// gRPC status codes (google.rpc.Code).
const UNKNOWN: i32 = 2;
const DEADLINE_EXCEEDED: i32 = 4;
const ABORTED: i32 = 10;
const INTERNAL: i32 = 13;
const UNAVAILABLE: i32 = 14;

/// Transient broker states are retryable; everything else (permissions,
/// missing topic, invalid message, quota) is a rejection.
fn classify(code: i32, message: &str) -> TransportError {
    match code {
        UNKNOWN | DEADLINE_EXCEEDED | ABORTED | INTERNAL | UNAVAILABLE => {
            TransportError::Connection(message.to_string())
        }
        _ => TransportError::Rejected(message.to_string()),
    }
}

fn construction_error(reason: String) -> FeedError {
    FeedError::TransportConstruction {
        transport: "pubsub-topic".into(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransportConfig;
    use crate::connect::connect;
    use std::time::Duration;

    const PERMISSION_DENIED: i32 = 7;
    const NOT_FOUND: i32 = 5;
    const INVALID_ARGUMENT: i32 = 3;
    const RESOURCE_EXHAUSTED: i32 = 8;

    #[test]
    fn permanent_statuses_are_rejections() {
        for code in [PERMISSION_DENIED, NOT_FOUND, INVALID_ARGUMENT, RESOURCE_EXHAUSTED] {
            let err = classify(code, "status");
            assert!(matches!(err, TransportError::Rejected(_)), "code {code}");
            assert!(!err.is_retryable());
        }
    }

    #[test]
    fn transient_statuses_are_connection_failures() {
        for code in [UNKNOWN, DEADLINE_EXCEEDED, ABORTED, INTERNAL, UNAVAILABLE] {
            let err = classify(code, "status");
            assert!(matches!(err, TransportError::Connection(_)), "code {code}");
            assert!(err.is_retryable());
        }
    }

    #[tokio::test]
    async fn unreachable_emulator_fails_construction() {
        // Nothing listens on port 1, so auth is skipped and the topic check fails.
        std::env::set_var("PUBSUB_EMULATOR_HOST", "127.0.0.1:1");
        let cfg = TransportConfig::Topic(TopicConfig::new("chainfeed-test", "blocks"));

        let err = connect(&cfg, Duration::from_secs(3)).await.err().unwrap();
        match &err {
            FeedError::TransportConstruction { transport, .. } => {
                assert_eq!(transport, "pubsub-topic");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.is_fatal());
    }
}
