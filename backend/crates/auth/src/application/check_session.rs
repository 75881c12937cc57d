//! Check Session Use Case
//!
//! Verifies an admin session token taken from the cookie.

use std::sync::Arc;

use chrono::Utc;
use platform::crypto::{constant_time_eq, from_base64_url, hmac_sha256};

use crate::application::config::AuthConfig;
use crate::domain::admin_session::AdminSession;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase {
    config: Arc<AuthConfig>,
}

impl CheckSessionUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Just check if session is valid (returns bool)
    pub fn is_valid(&self, session_token: Option<&str>) -> bool {
        self.is_valid_at(session_token, Utc::now().timestamp_millis())
    }

    pub fn is_valid_at(&self, session_token: Option<&str>, now_ms: i64) -> bool {
        session_token
            .map(|token| self.get_session_at(token, now_ms).is_ok())
            .unwrap_or(false)
    }

    /// Verify the signature and expiry of a token
    pub fn get_session_at(&self, session_token: &str, now_ms: i64) -> AuthResult<AdminSession> {
        let (payload, signature_b64) = session_token
            .split_once('.')
            .ok_or(AuthError::SessionInvalid)?;

        let signature = from_base64_url(signature_b64).map_err(|_| AuthError::SessionInvalid)?;
        let expected = hmac_sha256(&self.config.session_secret, payload.as_bytes());
        if !constant_time_eq(&expected, &signature) {
            return Err(AuthError::SessionInvalid);
        }

        let session = AdminSession::from_payload(payload).ok_or(AuthError::SessionInvalid)?;
        if session.is_expired_at(now_ms) {
            return Err(AuthError::SessionInvalid);
        }

        Ok(session)
    }
}
