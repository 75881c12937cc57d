//! Mini-App Client Error Types

use thiserror::Error;

/// Cache store failures
///
/// Never surfaced by [`crate::cache::TtlCache`]; the cache is best-effort and
/// swallows these after logging.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Store is full
    #[error("cache quota exceeded")]
    QuotaExceeded,

    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Client-specific result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Gateway client failures
#[derive(Debug, Error)]
pub enum ClientError {
    /// Gateway answered with a failure envelope
    #[error("gateway returned {status}: {message}")]
    Http { status: u16, message: String },

    /// Gateway unreachable
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Success status but the body was not JSON
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status, if the gateway answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
