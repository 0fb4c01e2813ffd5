//! Tracing / logging initialisation helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("Invalid log directive '{directives}': {reason}")]
    Filter { directives: String, reason: String },

    /// A global subscriber was already installed.
    #[error("Tracing already initialised: {0}")]
    AlreadyInitialised(String),
}

/// Log level per component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Global default level: "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_level")]
    pub level: String,
    /// Override per component: crate name → level
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    /// Emit JSON structured logs (true) or human-readable text (false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            components: BTreeMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Filter directives, e.g. `"info,chainfeed_transport=debug"`.
    pub fn directives(&self) -> String {
        let mut directives = self.level.clone();
        for (component, level) in &self.components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }
}

/// Install the global subscriber. Call once at startup.
///
/// `RUST_LOG`, when set, takes precedence over `config`.
pub fn init_tracing(config: &LogConfig) -> Result<(), LogInitError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = config.directives();
            EnvFilter::try_new(&directives).map_err(|e| LogInitError::Filter {
                directives,
                reason: e.to_string(),
            })?
        }
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };
    result.map_err(|e| LogInitError::AlreadyInitialised(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_include_component_overrides() {
        let mut config = LogConfig::default();
        config.components.insert("chainfeed-transport".into(), "debug".into());
        config.components.insert("redis".into(), "warn".into());
        assert_eq!(
            config.directives(),
            "info,chainfeed_transport=debug,redis=warn"
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: LogConfig = serde_yaml::from_str("json: true").unwrap();
        assert_eq!(config.level, "info");
        assert!(config.components.is_empty());
        assert!(config.json);
    }

    #[test]
    fn second_init_is_an_error() {
        let config = LogConfig {
            level: "warn".into(),
            ..Default::default()
        };
        // Another test may have installed a subscriber first; either way the
        // second call must not succeed.
        let _ = init_tracing(&config);
        assert!(matches!(
            init_tracing(&config),
            Err(LogInitError::AlreadyInitialised(_))
        ));
    }
}
