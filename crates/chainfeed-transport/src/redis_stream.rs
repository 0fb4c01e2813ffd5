//! Redis Streams client backed by a reconnecting `ConnectionManager`.

use async_trait::async_trait;
use chainfeed_core::{FeedError, TransportError};
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::RedisError;
use std::time::Duration;
use tracing::debug;

use crate::config::RedisConfig;
use crate::stream::{StreamClient, StreamTransport};

/// `XADD` client for one Redis server.
#[derive(Clone)]
pub struct RedisStreamClient {
    conn: ConnectionManager,
    addr: String,
    response_timeout: Duration,
}

impl RedisStreamClient {
    /// Open a managed connection. Fails if the server cannot be reached.
    pub async fn connect(config: &RedisConfig) -> Result<Self, FeedError> {
        let url = config
            .connection_url()
            .map_err(|e| construction_error(e.to_string()))?;
        let client =
            redis::Client::open(url.as_str()).map_err(|e| construction_error(e.to_string()))?;
        let response_timeout = config.response_timeout();
        let manager_config = ConnectionManagerConfig::new().set_response_timeout(response_timeout);
        let conn = ConnectionManager::new_with_config(client, manager_config)
            .await
            .map_err(|e| construction_error(format!("{}: {e}", config.addr)))?;

        debug!(addr = %config.addr, db = config.db, "redis connection established");
        Ok(Self {
            conn,
            addr: config.addr.clone(),
            response_timeout,
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }
}

#[async_trait]
impl StreamClient for RedisStreamClient {
    async fn append(
        &self,
        stream: &str,
        fields: &[(&str, &[u8])],
    ) -> Result<String, TransportError> {
        let mut cmd = redis::cmd("XADD");
        cmd.arg(stream).arg("*");
        for (field, value) in fields {
            cmd.arg(*field).arg(*value);
        }

        let mut conn = self.conn.clone();
        let id: String = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| classify(e, self.response_timeout))?;
        Ok(id)
    }

    fn name(&self) -> &str {
        "redis-stream"
    }
}

impl StreamTransport<RedisStreamClient> {
    /// Connect to Redis and wrap the client as a `BlockTransport`.
    pub async fn connect(config: &RedisConfig) -> Result<Self, FeedError> {
        Ok(Self::new(RedisStreamClient::connect(config).await?))
    }
}

fn construction_error(reason: String) -> FeedError {
    FeedError::TransportConstruction {
        transport: "redis-stream".into(),
        reason,
    }
}

/// Network-level failures are retryable; anything the server answered is not.
fn classify(err: RedisError, response_timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            ms: response_timeout.as_millis() as u64,
        }
    } else if err.is_connection_dropped() || err.is_connection_refusal() || err.is_io_error() {
        TransportError::Connection(err.to_string())
    } else {
        TransportError::Rejected(err.to_string())
    }
}
