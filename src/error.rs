//! Error types for the tag cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error produced by a key/value store client, kept as-is.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

// == Cache Error Enum ==
/// Unified error type for the tag cache.
///
/// Misses, expired entries and invalidated entries are not errors; they
/// surface as `false` / `None` from the cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A required collaborator is missing or misconfigured
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote token registry failed
    #[error("Backend error: {0}")]
    Backend(#[source] BackendError),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No live entry for the requested tags
    #[error("Entry not found: {0}")]
    NotFound(String),
}

impl From<BackendError> for CacheError {
    fn from(err: BackendError) -> Self {
        CacheError::Backend(err)
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::Backend(_) => StatusCode::BAD_GATEWAY,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the tag cache.
pub type Result<T> = std::result::Result<T, CacheError>;
