//! Error types for the chainfeed pipeline.

use thiserror::Error;

/// Errors raised while turning a finalized block into a published event.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The sender of a transaction could not be recovered from its signature.
    #[error("Sender recovery failed for transaction {tx_hash}: {reason}")]
    SignatureRecovery { tx_hash: String, reason: String },

    /// The block handed over by the node violates a structural invariant.
    #[error("Invalid block {block_hash}: {reason}")]
    InvalidBlock { block_hash: String, reason: String },

    /// A record could not be serialized (or deserialized) by the canonical encoder.
    #[error("Encoding error ({what}): {source}")]
    Encoding {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The transport could not be established at startup.
    #[error("Failed to construct {transport} transport: {reason}")]
    TransportConstruction { transport: String, reason: String },

    /// A single publish/append call failed after the transport was ready.
    #[error("Publish to '{channel}' failed for {key}: {source}")]
    TransportPublish {
        channel: String,
        key: String,
        #[source]
        source: TransportError,
    },
}

impl FeedError {
    /// Returns `true` if the host must stop processing rather than retry.
    ///
    /// Only [`FeedError::TransportPublish`] is recoverable; the host decides
    /// whether to retry, skip or halt on it.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::TransportPublish { .. })
    }

    /// Returns the underlying transport error, if any.
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            Self::TransportPublish { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors surfaced by a concrete transport backend.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection to the backend is down or was dropped.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The call did not complete before the publish deadline.
    #[error("Publish timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// The backend answered but refused the payload (quota, permissions, bad command).
    #[error("Rejected by backend: {0}")]
    Rejected(String),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` if retrying the same payload later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_publish_errors_are_recoverable() {
        let publish = FeedError::TransportPublish {
            channel: "block-transactions".into(),
            key: "0xabc".into(),
            source: TransportError::Connection("refused".into()),
        };
        assert!(!publish.is_fatal());
        assert!(publish.transport_error().unwrap().is_retryable());

        let recovery = FeedError::SignatureRecovery {
            tx_hash: "0x01".into(),
            reason: "bad signature".into(),
        };
        assert!(recovery.is_fatal());
        assert!(recovery.transport_error().is_none());
    }

    #[test]
    fn rejected_is_not_retryable() {
        assert!(!TransportError::Rejected("NOAUTH".into()).is_retryable());
        assert!(TransportError::Timeout { ms: 10 }.is_retryable());
    }

    #[test]
    fn publish_error_message_names_block() {
        let e = FeedError::TransportPublish {
            channel: "block-transactions".into(),
            key: "0xfeed".into(),
            source: TransportError::Timeout { ms: 500 },
        };
        let msg = e.to_string();
        assert!(msg.contains("0xfeed"));
        assert!(msg.contains("block-transactions"));
    }
}
