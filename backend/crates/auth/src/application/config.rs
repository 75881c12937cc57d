//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::crypto::random_bytes;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Shared admin password (empty rejects every sign-in)
    pub admin_password: String,
    /// Secret key for HMAC-signing admin sessions (32 bytes)
    pub session_secret: [u8; 32],
    /// Admin session lifetime (24 hours)
    pub session_ttl: Duration,
    /// Admin session cookie name
    pub session_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Telegram bot token; `None` runs the gateway in degraded mode
    pub bot_token: Option<String>,
    /// Maximum accepted init data age; `None` disables the check
    pub init_data_max_age: Option<Duration>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_password: String::new(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(24 * 3600), // 24 hours
            session_cookie_name: "admin_session".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            bot_token: None,
            init_data_max_age: Some(Duration::from_secs(24 * 3600)),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_password", &"[REDACTED]")
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("session_cookie_name", &self.session_cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("bot_token", &self.bot_token.as_ref().map(|_| "[REDACTED]"))
            .field("init_data_max_age", &self.init_data_max_age)
            .finish()
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&random_bytes(32));
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        i64::try_from(self.session_ttl.as_millis()).unwrap_or(i64::MAX)
    }

    /// Whether init data signatures are checked
    pub fn verification_enabled(&self) -> bool {
        self.bot_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Cookie attributes for the admin session
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl_ms(), 86_400_000);
        assert_eq!(config.session_cookie_name, "admin_session");
        assert!(config.cookie_secure);
        assert!(!config.verification_enabled());
    }

    #[test]
    fn test_development_is_insecure_with_random_secret() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();
        assert!(!a.cookie_secure);
        assert_ne!(a.session_secret, [0u8; 32]);
        assert_ne!(a.session_secret, b.session_secret);
    }

    #[test]
    fn test_empty_bot_token_disables_verification() {
        let config = AuthConfig {
            bot_token: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.verification_enabled());

        let config = AuthConfig {
            bot_token: Some("1:x".into()),
            ..Default::default()
        };
        assert!(config.verification_enabled());
    }

    #[test]
    fn test_huge_session_ttl_saturates() {
        let config = AuthConfig {
            session_ttl: Duration::from_secs(u64::MAX),
            ..Default::default()
        };
        assert_eq!(config.session_ttl_ms(), i64::MAX);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            admin_password: "hunter2".into(),
            bot_token: Some("1:SECRET".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("SECRET"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = AuthConfig::default().session_cookie().build_set_cookie("tok");
        assert!(cookie.starts_with("admin_session=tok"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=86400"));
    }
}
