use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rhub_kernel::server::error::error_response;
use std::borrow::Cow;

/// A specialized error enum for the chores slice.
#[derive(Debug, thiserror::Error)]
pub enum ChoresError {
    /// A spec in the batch failed validation; nothing was persisted.
    #[error("validation failed: {message}")]
    Validation { message: Cow<'static, str> },

    /// The caller is not an active member of the room.
    #[error("forbidden: {message}")]
    Forbidden { message: Cow<'static, str> },

    /// Unknown room.
    #[error("not found: {message}")]
    NotFound { message: Cow<'static, str> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("internal error: {message}")]
    Internal { message: Cow<'static, str> },
}

impl IntoResponse for ChoresError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            Self::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION"),
            Self::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        };
        error_response(status, kind, self.to_string())
    }
}
