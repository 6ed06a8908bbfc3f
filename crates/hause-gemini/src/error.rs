//! Error types for generation calls.

use thiserror::Error;

/// Errors from the generative-language API.
///
/// These never cross the [`crate::ContentGenerator`] boundary; they exist so
/// the client itself can be tested and logged precisely.
#[derive(Error, Debug)]
pub enum GeminiError {
    /// Transport-level failure talking to the API.
    #[error("request error: {0}")]
    Request(String),

    /// Non-success HTTP status from the API.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Response did not contain generated text where expected.
    #[error("invalid response format")]
    InvalidResponse,
}

/// Result type alias for generation calls.
pub type Result<T> = std::result::Result<T, GeminiError>;
