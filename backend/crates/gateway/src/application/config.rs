//! Application Configuration
//!
//! Configuration for the relay application layer.

use std::time::Duration;

/// Gateway application configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// VPN backend base URL, without trailing slash
    pub backend_url: String,
    /// Bound on a single backend call
    pub backend_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000".to_string(),
            backend_timeout: Duration::from_secs(15),
        }
    }
}

impl GatewayConfig {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Create config for development (local backend)
    pub fn development() -> Self {
        Self::default()
    }

    /// Absolute URL for a backend path
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.backend_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.backend_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_url_for_joins_single_slash() {
        let config = GatewayConfig::new("https://vpn.example/");
        assert_eq!(config.backend_url, "https://vpn.example");
        assert_eq!(config.url_for("/v1/user/billing"), "https://vpn.example/v1/user/billing");
        assert_eq!(config.url_for("v1/user/billing"), "https://vpn.example/v1/user/billing");
    }
}
