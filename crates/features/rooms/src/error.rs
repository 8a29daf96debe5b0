use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rhub_domain::role::AccessError;
use rhub_kernel::server::error::error_response;
use std::borrow::Cow;

/// A specialized error enum for the rooms slice.
#[derive(Debug, thiserror::Error)]
pub enum RoomsError {
    /// Malformed or missing input.
    #[error("validation failed: {message}")]
    Validation { message: Cow<'static, str> },

    /// Rank or ownership violation, including self-targeted actions.
    #[error("forbidden: {message}")]
    Forbidden { message: Cow<'static, str> },

    /// Unknown room, code, or member.
    #[error("not found: {message}")]
    NotFound { message: Cow<'static, str> },

    /// The actor already holds an active membership there.
    #[error("conflict: {message}")]
    Conflict { message: Cow<'static, str> },

    /// A room or user count cap would be exceeded.
    #[error("limit exceeded: {message}")]
    LimitExceeded { message: Cow<'static, str> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("internal error: {message}")]
    Internal { message: Cow<'static, str> },
}

impl From<AccessError> for RoomsError {
    fn from(err: AccessError) -> Self {
        Self::Forbidden { message: err.to_string().into() }
    }
}

impl IntoResponse for RoomsError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            Self::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION"),
            Self::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT"),
            Self::LimitExceeded { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "LIMIT_EXCEEDED"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        };
        error_response(status, kind, self.to_string())
    }
}
