//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::init_data::InitDataError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong admin password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Sign-in request without a password
    #[error("Password is required")]
    MissingPassword,

    /// Admin session cookie missing, forged, or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// No init data on a request that requires identity
    #[error("Missing init data")]
    MissingInitData,

    /// Init data failed verification
    #[error("Invalid init data: {0}")]
    InitData(#[from] InitDataError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::MissingInitData
            | AuthError::InitData(_) => ErrorKind::Unauthorized,
            AuthError::MissingPassword => ErrorKind::BadRequest,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Message safe to show to the caller
    pub fn public_message(&self) -> String {
        match self {
            AuthError::InitData(_) => "Invalid init data".to_string(),
            AuthError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid admin login attempt");
            }
            AuthError::InitData(reason) => {
                tracing::warn!(reason = reason.reason(), "Init data rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::MissingPassword.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::InitData(InitDataError::Stale).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_message_hides_internals() {
        assert_eq!(AuthError::InvalidCredentials.public_message(), "Invalid credentials");
        assert_eq!(
            AuthError::Internal("db exploded".into()).public_message(),
            "Internal server error"
        );
        assert_eq!(
            AuthError::InitData(InitDataError::SignatureMismatch).public_message(),
            "Invalid init data"
        );
    }
}
