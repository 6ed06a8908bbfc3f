//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// API error type for consistent error responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// An outbound call to the messaging platform failed.
    #[error("upstream failure: {0}")]
    UpstreamFailure(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string()
        }));
        (status, body).into_response()
    }
}

impl From<hause_store::StoreError> for ApiError {
    fn from(err: hause_store::StoreError) -> Self {
        match err {
            hause_store::StoreError::NotFound(id) => {
                ApiError::NotFound(format!("community not found: {}", id))
            }
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<hause_engine::EngineError> for ApiError {
    fn from(err: hause_engine::EngineError) -> Self {
        match err {
            hause_engine::EngineError::NotFound(id) => {
                ApiError::NotFound(format!("community not found: {}", id))
            }
            hause_engine::EngineError::NotConnected(id) => {
                ApiError::BadRequest(format!("community not connected: {}", id))
            }
            hause_engine::EngineError::SendFailed(id) => {
                ApiError::UpstreamFailure(format!("failed to send post for community: {}", id))
            }
            hause_engine::EngineError::Store(e) => e.into(),
        }
    }
}
