//! Backend Port
//!
//! Interface for the outbound call. Implementation is in infrastructure layer.

use axum::http::Method;
use serde_json::Value;
use thiserror::Error;

/// Outbound request to the VPN backend
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub method: Method,
    /// Path below the backend base URL, e.g. `/v1/user/billing`
    pub path: String,
    pub query: Vec<(String, String)>,
    /// JSON body, forwarded unmodified
    pub body: Option<Value>,
    /// Raw init data, sent as `Authorization`
    pub authorization: Option<String>,
}

/// Raw backend answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl BackendReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The backend could not be reached or its answer could not be read
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("backend request timed out")]
    Timeout,

    #[error("backend connection failed: {0}")]
    Connect(String),

    #[error("backend response body unreadable: {0}")]
    Body(String),

    #[error("backend request failed: {0}")]
    Other(String),
}

/// Backend client trait
#[trait_variant::make(BackendClient: Send)]
pub trait LocalBackendClient {
    /// Perform one request; no retries
    async fn send(&self, request: BackendRequest) -> Result<BackendReply, TransportError>;
}
