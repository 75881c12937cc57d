//! Verify Init Data Use Case
//!
//! Decides whether a relayed request carries a trustworthy Telegram identity.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::domain::init_data::InitData;
use crate::domain::services::verify_at;
use crate::error::AuthResult;

/// Outcome of an identity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityCheck {
    /// Signature and age checked
    Verified(InitData),
    /// No bot token configured, nothing was checked
    Unverified,
}

/// Verify init data use case
pub struct VerifyInitDataUseCase {
    config: Arc<AuthConfig>,
}

impl VerifyInitDataUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Whether signatures are actually checked
    pub fn is_enforced(&self) -> bool {
        self.config.verification_enabled()
    }

    pub fn execute(&self, raw: &str) -> AuthResult<IdentityCheck> {
        self.execute_at(raw, Utc::now())
    }

    pub fn execute_at(&self, raw: &str, now: DateTime<Utc>) -> AuthResult<IdentityCheck> {
        let bot_token = match self.config.bot_token.as_deref() {
            Some(token) if !token.is_empty() => token,
            _ => {
                tracing::warn!("TELEGRAM_BOT_TOKEN not set, relaying init data unverified");
                return Ok(IdentityCheck::Unverified);
            }
        };

        let init_data = verify_at(raw, bot_token, self.config.init_data_max_age, now)?;

        tracing::debug!(
            user_id = init_data.user.as_ref().map(|u| u.id),
            "Init data verified"
        );

        Ok(IdentityCheck::Verified(init_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::init_data::InitDataError;
    use crate::domain::services::sign_init_data;
    use crate::error::AuthError;
    use chrono::TimeZone;
    use std::time::Duration;

    const BOT_TOKEN: &str = "42:ABC";

    fn use_case(bot_token: Option<&str>) -> VerifyInitDataUseCase {
        VerifyInitDataUseCase::new(Arc::new(AuthConfig {
            bot_token: bot_token.map(str::to_string),
            init_data_max_age: Some(Duration::from_secs(60)),
            ..Default::default()
        }))
    }

    #[test]
    fn test_verified_when_token_configured() {
        let raw = sign_init_data(&[("auth_date", "100"), ("user", r#"{"id":5}"#)], BOT_TOKEN);
        let now = Utc.timestamp_opt(120, 0).unwrap();

        let uc = use_case(Some(BOT_TOKEN));
        assert!(uc.is_enforced());
        match uc.execute_at(&raw, now).unwrap() {
            IdentityCheck::Verified(data) => assert_eq!(data.user.unwrap().id, 5),
            IdentityCheck::Unverified => panic!("expected verified identity"),
        }
    }

    #[test]
    fn test_stale_is_rejected() {
        let raw = sign_init_data(&[("auth_date", "100")], BOT_TOKEN);
        let now = Utc.timestamp_opt(161, 0).unwrap();

        let err = use_case(Some(BOT_TOKEN)).execute_at(&raw, now).unwrap_err();
        assert!(matches!(err, AuthError::InitData(InitDataError::Stale)));
    }

    #[test]
    fn test_degraded_mode_skips_verification() {
        let uc = use_case(None);
        assert!(!uc.is_enforced());
        assert_eq!(uc.execute("garbage").unwrap(), IdentityCheck::Unverified);
        assert_eq!(use_case(Some("")).execute("x").unwrap(), IdentityCheck::Unverified);
    }
}
