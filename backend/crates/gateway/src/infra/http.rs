//! HTTP Backend Implementation
//!
//! Implements the backend port with a shared reqwest client.

use axum::http::header::AUTHORIZATION;

use crate::application::config::GatewayConfig;
use crate::domain::backend::{BackendClient, BackendReply, BackendRequest, TransportError};
use crate::error::{GatewayError, GatewayResult};

/// reqwest-backed backend client
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpBackend {
    /// Build a client with the configured timeout
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.backend_timeout)
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

impl BackendClient for HttpBackend {
    async fn send(&self, request: BackendRequest) -> Result<BackendReply, TransportError> {
        let url = self.config.url_for(&request.path);

        let mut builder = self.client.request(request.method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(authorization) = &request.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(BackendReply {
            status,
            body: body.to_vec(),
        })
    }
}
