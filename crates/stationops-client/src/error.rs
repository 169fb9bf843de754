//! Synchronization-layer error types.
//!
//! Every failure is terminal for that call — no automatic retry exists
//! anywhere in this layer. Read paths degrade to empty collections instead
//! of surfacing these errors; mutation paths report them to the caller with
//! local state untouched.

use stationops_core::Operation;

/// Errors from the synchronization layer.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Network-level fault reaching the remote endpoint.
    #[error("transport failure during {action}: {source}")]
    Transport {
        action: String,
        source: reqwest::Error,
    },
    /// Response body was not a shape this client recognizes.
    #[error("malformed response from {action}: {detail}")]
    MalformedResponse { action: String, detail: String },
    /// The remote endpoint answered with an explicit unsuccessful result.
    #[error("{action} rejected by remote: {}", .message.as_deref().unwrap_or("unknown error"))]
    Rejected {
        action: String,
        message: Option<String>,
    },
    /// The permission gate denied the operation. No network call was made.
    #[error("session is not authorized to perform {operation:?}")]
    Unauthorized { operation: Operation },
    /// A mutation was attempted without an active session.
    #[error("no active session")]
    NoSession,
    /// Attachment exceeds the transport size ceiling. No network call was made.
    #[error("attachment is {size} bytes, exceeding the {limit}-byte ceiling")]
    AttachmentTooLarge { size: usize, limit: usize },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl SyncError {
    /// Human-readable failure notice for presentation. Remote rejection
    /// messages are surfaced verbatim when the response carried one.
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Rejected {
                message: Some(msg), ..
            } => msg.clone(),
            other => other.to_string(),
        }
    }
}
