//! Admin Sign In Use Case
//!
//! Checks the shared admin password and mints a signed session token.

use std::sync::Arc;

use chrono::Utc;
use platform::crypto::{constant_time_eq, hmac_sha256, sha256, to_base64_url};

use crate::application::config::AuthConfig;
use crate::domain::admin_session::AdminSession;
use crate::error::{AuthError, AuthResult};

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: String,
    pub expires_at_ms: i64,
}

/// Admin sign in use case
pub struct SignInUseCase {
    config: Arc<AuthConfig>,
}

impl SignInUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self, password: Option<&str>) -> AuthResult<SignInOutput> {
        self.execute_at(password, Utc::now().timestamp_millis())
    }

    pub fn execute_at(&self, password: Option<&str>, now_ms: i64) -> AuthResult<SignInOutput> {
        let password = password.ok_or(AuthError::MissingPassword)?;

        if !self.verify_password(password) {
            return Err(AuthError::InvalidCredentials);
        }

        let session = AdminSession::new(now_ms, self.config.session_ttl_ms());
        let session_token = sign_session(&session, &self.config.session_secret);

        tracing::info!(expires_at_ms = session.expires_at_ms, "Admin session issued");

        Ok(SignInOutput {
            session_token,
            expires_at_ms: session.expires_at_ms,
        })
    }

    /// Compare against the configured password
    ///
    /// Both sides are hashed first so the comparison runs over equal-length
    /// digests regardless of input length.
    pub fn verify_password(&self, password: &str) -> bool {
        if self.config.admin_password.is_empty() {
            return false;
        }
        let expected = sha256(self.config.admin_password.as_bytes());
        let supplied = sha256(password.as_bytes());
        constant_time_eq(&expected, &supplied)
    }
}

/// Render a session as `payload.signature`
pub(crate) fn sign_session(session: &AdminSession, secret: &[u8]) -> String {
    let payload = session.to_payload();
    let signature = hmac_sha256(secret, payload.as_bytes());
    format!("{}.{}", payload, to_base64_url(&signature))
}
