//! Error types for the clipboard service and reconciliation loop.

use crate::subscriptions::DropReason;
use thiserror::Error;

/// Main error type for clipboard operations.
#[derive(Debug, Error)]
pub enum ClipError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("System clipboard is unsupported")]
    ClipboardUnsupported,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Timed out waiting for a value")]
    Timeout,

    #[error("Stream closed")]
    StreamClosed,

    #[error("Subscription dropped: {0:?}")]
    SubscriptionDropped(DropReason),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ClipError {
    /// True when the error is a cancellation rather than a failure.
    ///
    /// Pumps that observe a cancelled error terminate cleanly instead of
    /// being restarted.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClipError::Cancelled)
    }
}

impl From<serde_json::Error> for ClipError {
    fn from(e: serde_json::Error) -> Self {
        ClipError::Serialization(e.to_string())
    }
}

/// Result type for clipboard operations.
pub type Result<T> = std::result::Result<T, ClipError>;
