//! Gateway Error Types
//!
//! Relay-specific error variants, classified with the shared
//! `kernel::error::kind::ErrorKind` and rendered through the route envelopes.

use auth::AuthError;
use axum::http::StatusCode;
use kernel::error::kind::ErrorKind;
use thiserror::Error;

use crate::domain::backend::TransportError;
use crate::domain::envelope::{ProxyResponse, messages};

/// Gateway-specific result type alias
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway-specific error variants
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed or missing input
    #[error("Validation failed: {0}")]
    Validation(&'static str),

    /// Missing or rejected identity
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    /// Non-2xx answer from the backend
    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// Backend unreachable or unreadable
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Backend { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            other => StatusCode::from_u16(other.kind().status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Validation(_) => ErrorKind::BadRequest,
            GatewayError::Unauthorized(_) => ErrorKind::Unauthorized,
            GatewayError::Backend { status, .. } => {
                ErrorKind::from_status(*status).unwrap_or(ErrorKind::BadGateway)
            }
            GatewayError::Transport(_) | GatewayError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Short localized message shown to the Mini-App user
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::Validation(msg) => (*msg).to_string(),
            GatewayError::Unauthorized(_) => messages::UNAUTHORIZED.to_string(),
            GatewayError::Backend { message, .. } => message.clone(),
            GatewayError::Transport(_) | GatewayError::Internal(_) => {
                messages::INTERNAL_ERROR.to_string()
            }
        }
    }

    /// Normalized relay outcome for this error
    pub fn to_proxy_response(&self) -> ProxyResponse {
        ProxyResponse::failure(self.status_code().as_u16(), self.public_message())
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self, page: &str, action: &str, endpoint: &str) {
        match self {
            GatewayError::Transport(e) => {
                tracing::error!(page, action, endpoint, error = %e, "Backend transport failure");
            }
            GatewayError::Internal(msg) => {
                tracing::error!(page, action, endpoint, reason = %msg, "Gateway internal error");
            }
            GatewayError::Unauthorized(e) => {
                tracing::warn!(page, action, endpoint, error = %e, "Relay rejected: unauthorized");
            }
            GatewayError::Backend { status, message } if *status >= 500 => {
                tracing::warn!(page, action, endpoint, status, detail = %message, "Backend error");
            }
            _ => {
                tracing::info!(page, action, endpoint, error = %self, "Relay failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::models::InitDataError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::Validation(messages::INVALID_BODY).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::Unauthorized(AuthError::MissingInitData).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GatewayError::Backend {
                status: 418,
                message: "teapot".into()
            }
            .status_code()
            .as_u16(),
            418
        );
        assert_eq!(
            GatewayError::Transport(TransportError::Timeout).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_transport_error_text_never_public() {
        let err = GatewayError::Transport(TransportError::Connect(
            "tcp connect error: 10.0.0.5:8080 refused".into(),
        ));
        assert_eq!(err.public_message(), messages::INTERNAL_ERROR);
        assert!(!err.to_proxy_response().error_message().contains("10.0.0.5"));
    }

    #[test]
    fn test_unauthorized_hides_reason() {
        let err = GatewayError::from(AuthError::InitData(InitDataError::Stale));
        assert_eq!(err.public_message(), messages::UNAUTHORIZED);
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_unknown_backend_status_kind() {
        let err = GatewayError::Backend {
            status: 418,
            message: "x".into(),
        };
        assert_eq!(err.kind(), ErrorKind::BadGateway);
    }
}
