//! Transport configuration.
//!
//! Built once at process start from YAML and never mutated afterwards.

use chainfeed_observability::LogConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ─── Redis ───────────────────────────────────────────────────────────────────

/// Connection settings for the Redis Streams transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisConfig {
    /// `host:port`, or a full `redis://` / `rediss://` URL.
    pub addr: String,
    /// Password (`AUTH`); empty or absent disables authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    /// Logical database index.
    #[serde(default)]
    pub db: u32,
    /// How long to wait for the server to answer one command.
    #[serde(default = "default_response_timeout_ms")]
    pub response_timeout_ms: u64,
}

fn default_response_timeout_ms() -> u64 {
    5_000
}

impl RedisConfig {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            auth: None,
            db: 0,
            response_timeout_ms: default_response_timeout_ms(),
        }
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }

    pub fn with_auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    /// Build the connection URL understood by the redis client.
    pub fn connection_url(&self) -> Result<Url, ConfigError> {
        let raw = if self.addr.contains("://") {
            self.addr.clone()
        } else {
            format!("redis://{}", self.addr)
        };
        let mut url = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
            field: "addr",
            reason: format!("'{}': {e}", self.addr),
        })?;
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::Invalid {
                field: "addr",
                reason: format!("'{}' has no host", self.addr),
            });
        }

        if let Some(auth) = self.auth.as_deref().filter(|a| !a.is_empty()) {
            url.set_password(Some(auth)).map_err(|_| ConfigError::Invalid {
                field: "auth",
                reason: "cannot be encoded into the connection URL".into(),
            })?;
        }
        if self.db != 0 {
            url.set_path(&format!("/{}", self.db));
        }
        Ok(url)
    }
}

// ─── Pub/Sub ─────────────────────────────────────────────────────────────────

/// Settings for the Google Cloud Pub/Sub transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicConfig {
    pub project_id: String,
    /// Topic receiving encoded blocks.
    #[serde(default = "default_block_topic")]
    pub topic: String,
    /// Topic receiving contract code records.
    #[serde(default = "default_code_topic")]
    pub code_topic: String,
}

fn default_block_topic() -> String {
    chainfeed_core::channel::BLOCK_TRANSACTIONS.to_string()
}

fn default_code_topic() -> String {
    chainfeed_core::channel::BLOCK_CODE.to_string()
}

impl TopicConfig {
    pub fn new(project_id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            topic: topic.into(),
            code_topic: default_code_topic(),
        }
    }
}

// ─── Top level ───────────────────────────────────────────────────────────────

/// Which backend to publish to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransportConfig {
    Stream(RedisConfig),
    Topic(TopicConfig),
}

impl TransportConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stream(_) => "stream",
            Self::Topic(_) => "topic",
        }
    }
}

/// Everything the host needs to construct a `FeedPublisher`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub transport: TransportConfig,
    /// Deadline for a single publish/append call.
    #[serde(default = "default_publish_timeout_ms")]
    pub publish_timeout_ms: u64,
    /// Deadline for establishing the transport at startup.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_publish_timeout_ms() -> u64 {
    chainfeed_core::DEFAULT_PUBLISH_TIMEOUT.as_millis() as u64
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl FeedConfig {
    pub fn new(transport: TransportConfig) -> Self {
        Self {
            transport,
            publish_timeout_ms: default_publish_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            log: LogConfig::default(),
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    pub fn publish_timeout(&self) -> Duration {
        Duration::from_millis(self.publish_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("publish_timeout_ms", self.publish_timeout_ms),
            ("connect_timeout_ms", self.connect_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero".into(),
                });
            }
        }
        match &self.transport {
            TransportConfig::Stream(redis) => {
                redis.connection_url()?;
            }
            TransportConfig::Topic(topic) if topic.project_id.is_empty() => {
                return Err(ConfigError::Invalid {
                    field: "project_id",
                    reason: "must not be empty".into(),
                });
            }
            TransportConfig::Topic(_) => {}
        }
        Ok(())
    }
}
