//! Error types for the engine.

use thiserror::Error;

/// Errors that can occur in the scheduling/generation core.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Community record does not exist.
    #[error("community not found: {0}")]
    NotFound(String),

    /// Community has no bot credential or chat id configured.
    #[error("community not connected: {0}")]
    NotConnected(String),

    /// The messaging platform rejected or dropped the send.
    #[error("failed to send message for community {0}")]
    SendFailed(String),

    /// Record store failure.
    #[error(transparent)]
    Store(#[from] hause_store::StoreError),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Whether this error means the community record is simply absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
            || matches!(self, Self::Store(hause_store::StoreError::NotFound(_)))
    }
}
