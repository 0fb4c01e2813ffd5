//! Build the configured transport once at startup.

use chainfeed_core::{BlockTransport, FeedError, FeedPublisher};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::config::{FeedConfig, RedisConfig, TopicConfig, TransportConfig};

/// Construct the backend named by `config`.
///
/// Fails with [`FeedError::TransportConstruction`] when the backend is
/// unreachable within `connect_timeout`, or when support for it was not
/// compiled in.
pub async fn connect(
    config: &TransportConfig,
    connect_timeout: Duration,
) -> Result<Arc<dyn BlockTransport>, FeedError> {
    let attempt = async {
        match config {
            TransportConfig::Stream(redis) => connect_stream(redis).await,
            TransportConfig::Topic(topic) => connect_topic(topic).await,
        }
    };

    let result = match tokio::time::timeout(connect_timeout, attempt).await {
        Ok(result) => result,
        Err(_) => Err(FeedError::TransportConstruction {
            transport: backend_name(config).to_string(),
            reason: format!("not ready after {}ms", connect_timeout.as_millis()),
        }),
    };

    match result {
        Ok(transport) => {
            info!(kind = config.kind(), transport = transport.name(), "transport ready");
            Ok(transport)
        }
        Err(e) => {
            error!(kind = config.kind(), error = %e, "transport construction failed");
            Err(e)
        }
    }
}

/// Connect the transport and wrap it in a [`FeedPublisher`] with the
/// configured publish deadline.
pub async fn connect_publisher(config: &FeedConfig) -> Result<FeedPublisher, FeedError> {
    let transport = connect(&config.transport, config.connect_timeout()).await?;
    Ok(FeedPublisher::new(transport).with_timeout(config.publish_timeout()))
}

fn backend_name(config: &TransportConfig) -> &'static str {
    match config {
        TransportConfig::Stream(_) => "redis-stream",
        TransportConfig::Topic(_) => "pubsub-topic",
    }
}

#[cfg(feature = "redis")]
async fn connect_stream(config: &RedisConfig) -> Result<Arc<dyn BlockTransport>, FeedError> {
    let transport = crate::stream::StreamTransport::connect(config).await?;
    Ok(Arc::new(transport))
}

#[cfg(not(feature = "redis"))]
async fn connect_stream(_config: &RedisConfig) -> Result<Arc<dyn BlockTransport>, FeedError> {
    Err(not_compiled("redis-stream", "redis"))
}

#[cfg(feature = "pubsub")]
async fn connect_topic(config: &TopicConfig) -> Result<Arc<dyn BlockTransport>, FeedError> {
    let transport = crate::topic::TopicTransport::connect(config).await?;
    Ok(Arc::new(transport))
}

#[cfg(not(feature = "pubsub"))]
async fn connect_topic(_config: &TopicConfig) -> Result<Arc<dyn BlockTransport>, FeedError> {
    Err(not_compiled("pubsub-topic", "pubsub"))
}

#[allow(dead_code)]
fn not_compiled(transport: &str, feature: &str) -> FeedError {
    FeedError::TransportConstruction {
        transport: transport.to_string(),
        reason: format!("built without the '{feature}' feature"),
    }
}
