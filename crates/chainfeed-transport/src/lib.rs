//! # chainfeed-transport
//!
//! Backends for the `BlockTransport` port.
//!
//! # Overview
//!
//! - [`StreamTransport`]: append-only Redis Streams (`XADD`), one stream per channel
//! - [`TopicTransport`]: Google Cloud Pub/Sub, one topic per channel
//! - [`connect`] / [`connect_publisher`]: build the configured backend once at startup
//!
//! Both transports sit on a small client trait ([`StreamClient`],
//! [`TopicPublisher`]) so the channel layout can be exercised without a
//! live broker. The real clients are behind the `redis` (default) and
//! `pubsub` features.

pub mod config;
pub mod connect;
pub mod stream;
pub mod topic;

#[cfg(feature = "redis")]
pub mod redis_stream;

#[cfg(feature = "pubsub")]
pub mod pubsub_topic;

pub use config::{ConfigError, FeedConfig, RedisConfig, TopicConfig, TransportConfig};
pub use connect::{connect, connect_publisher};
pub use stream::{StreamClient, StreamTransport};
pub use topic::{TopicPublisher, TopicTransport};

#[cfg(feature = "redis")]
pub use redis_stream::RedisStreamClient;

#[cfg(feature = "pubsub")]
pub use pubsub_topic::PubSubTopicClient;
