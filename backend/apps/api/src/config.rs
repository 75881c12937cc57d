//! Server Configuration
//!
//! Built once from the environment at startup and handed to the crates as
//! immutable values.

use anyhow::{Context, bail};
use auth::AuthConfig;
use gateway::GatewayConfig;
use platform::crypto::from_base64;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Whole-process configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Prefix every route is nested under, e.g. `/api`
    pub api_prefix: String,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Read the process environment
    ///
    /// A missing `ADMIN_SESSION_SECRET` is replaced by a random one in debug
    /// builds only.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    pub fn from_lookup<F>(lookup: F, development: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let admin_password = var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;
        let backend_url = var("BACKEND_URL").context("BACKEND_URL must be set")?;

        let mut auth = if development {
            AuthConfig::development()
        } else {
            AuthConfig::default()
        };
        auth.admin_password = admin_password;

        match var("ADMIN_SESSION_SECRET") {
            Some(secret_b64) => {
                let bytes = from_base64(&secret_b64).context("ADMIN_SESSION_SECRET is not base64")?;
                if bytes.len() != 32 {
                    bail!("ADMIN_SESSION_SECRET must decode to 32 bytes, got {}", bytes.len());
                }
                auth.session_secret.copy_from_slice(&bytes);
            }
            None if development => {
                tracing::warn!("ADMIN_SESSION_SECRET not set, using a random secret");
            }
            None => bail!("ADMIN_SESSION_SECRET must be set in production"),
        }

        if let Some(ttl) = parse_u64(&var, "ADMIN_SESSION_TTL_SECS")? {
            auth.session_ttl = Duration::from_secs(ttl);
        }
        if let Some(secure) = parse_bool(&var, "COOKIE_SECURE")? {
            auth.cookie_secure = secure;
        }
        auth.bot_token = var("TELEGRAM_BOT_TOKEN");
        if let Some(max_age) = parse_u64(&var, "INIT_DATA_MAX_AGE_SECS")? {
            auth.init_data_max_age = (max_age > 0).then(|| Duration::from_secs(max_age));
        }

        let mut gateway = GatewayConfig::new(backend_url);
        if let Some(timeout) = parse_u64(&var, "BACKEND_TIMEOUT_SECS")? {
            gateway.backend_timeout = Duration::from_secs(timeout);
        }

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR is not a socket address")?;

        // Set but empty mounts at the root; only an unset prefix takes the default
        let api_prefix = normalize_prefix(
            lookup("API_PREFIX")
                .as_deref()
                .unwrap_or(DEFAULT_API_PREFIX),
        );

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            bind_addr,
            api_prefix,
            frontend_origins,
            auth,
            gateway,
        })
    }
}

fn parse_u64(var: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<u64>> {
    var(key)
        .map(|v| v.parse().with_context(|| format!("{key} must be a non-negative integer")))
        .transpose()
}

fn parse_bool(var: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<bool>> {
    var(key)
        .map(|v| match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => bail!("{key} must be true or false"),
        })
        .transpose()
}

/// `api/` → `/api`; an empty prefix mounts at the root
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
