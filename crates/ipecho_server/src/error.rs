//! HTTP-facing error types.

use axum::http::StatusCode;
use axum::http::header::WWW_AUTHENTICATE;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Challenge sent with every 401 from the auth gate.
pub const BASIC_CHALLENGE: &str = "Basic realm=\"Login Required\"";

const UNAUTHORIZED_BODY: &str = "Could not verify your access level for that URL.\n\
                                 You have to login with proper credentials";

/// Why a request failed Basic authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("missing authorization header")]
    Missing,
    #[error("malformed basic credentials")]
    Malformed,
    #[error("unknown user")]
    UnknownUser,
    #[error("password mismatch")]
    BadPassword,
}

impl AuthFailure {
    /// Short label used for metrics.
    pub fn reason(self) -> &'static str {
        match self {
            AuthFailure::Missing => "missing",
            AuthFailure::Malformed => "malformed",
            AuthFailure::UnknownUser => "unknown_user",
            AuthFailure::BadPassword => "bad_password",
        }
    }
}

/// API errors that convert to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthFailure),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(_) => (
                StatusCode::UNAUTHORIZED,
                [(WWW_AUTHENTICATE, BASIC_CHALLENGE)],
                UNAUTHORIZED_BODY,
            )
                .into_response(),
        }
    }
}
