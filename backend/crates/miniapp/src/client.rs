//! Gateway Client
//!
//! What the Mini-App runs on its side of the boundary: calls the gateway with
//! the launch init data and keeps read-mostly resources in the TTL cache.

use std::time::Duration;

use platform::client::INIT_DATA_HEADER;
use serde_json::Value;

use crate::cache::{CacheStore, Clock, SystemClock, TtlCache};
use crate::error::{ClientError, ClientResult};

/// Cache keys of the gateway resources
pub mod keys {
    pub const BILLING: &str = "billing";
    pub const REFERRALS: &str = "referrals";
    pub const AUTORENEWAL: &str = "autorenewal";

    pub fn referral_summary(contest_id: &str) -> String {
        format!("referral_summary:{contest_id}")
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway base URL including the API prefix, e.g. `https://app.example/api`
    pub base_url: String,
    pub timeout: Duration,
    /// Lifetime of cached GET resources
    pub cache_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api".to_string(),
            timeout: Duration::from_secs(20),
            cache_ttl: Duration::from_secs(60),
        }
    }
}

/// Gateway client with a response cache
pub struct GatewayClient<S, C = SystemClock> {
    http: reqwest::Client,
    config: ClientConfig,
    init_data: String,
    cache: TtlCache<S, C>,
}

impl<S: CacheStore, C: Clock> GatewayClient<S, C> {
    pub fn new(
        config: ClientConfig,
        init_data: impl Into<String>,
        cache: TtlCache<S, C>,
    ) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            config,
            init_data: init_data.into(),
            cache,
        })
    }

    pub fn cache(&self) -> &TtlCache<S, C> {
        &self.cache
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// GET /user/billing
    pub async fn billing(&self) -> ClientResult<Value> {
        self.cached_get(keys::BILLING, "/user/billing", &[]).await
    }

    /// GET /user/referrals
    pub async fn referrals(&self) -> ClientResult<Value> {
        self.cached_get(keys::REFERRALS, "/user/referrals", &[]).await
    }

    /// GET /user/autorenewal
    pub async fn autorenewal(&self) -> ClientResult<Value> {
        self.cached_get(keys::AUTORENEWAL, "/user/autorenewal", &[]).await
    }

    /// GET /referral/summary?contest_id=...
    pub async fn referral_summary(&self, contest_id: &str) -> ClientResult<Value> {
        self.cached_get(
            &keys::referral_summary(contest_id),
            "/referral/summary",
            &[("contest_id", contest_id)],
        )
        .await
    }

    /// POST /user/autorenewal; drops the cached autorenewal and billing state
    pub async fn set_autorenewal(&self, body: &Value) -> ClientResult<Value> {
        let result = self.post("/user/autorenewal", body).await?;
        self.cache.remove(keys::AUTORENEWAL);
        self.cache.remove(keys::BILLING);
        Ok(result)
    }

    /// POST /orders/create; drops the cached billing state
    pub async fn create_order(&self, body: &Value) -> ClientResult<Value> {
        let result = self.post("/orders/create", body).await?;
        self.cache.remove(keys::BILLING);
        Ok(result)
    }

    async fn cached_get(
        &self,
        key: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<Value> {
        self.cache
            .get_or_set(key, || self.get(path, query), Some(self.config.cache_ttl))
            .await
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<Value> {
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .header(INIT_DATA_HEADER, &self.init_data)
            .send()
            .await?;
        read_envelope(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> ClientResult<Value> {
        let response = self
            .http
            .post(self.url(path))
            .header(INIT_DATA_HEADER, &self.init_data)
            .json(body)
            .send()
            .await?;
        read_envelope(response).await
    }
}

/// Success body, or the gateway's failure message as an error
async fn read_envelope(response: reqwest::Response) -> ClientResult<Value> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if status.is_success() {
        return serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()));
    }

    let message = serde_json::from_slice::<Value>(&bytes)
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    tracing::debug!(status = status.as_u16(), message = %message, "Gateway call failed");

    Err(ClientError::Http {
        status: status.as_u16(),
        message,
    })
}
