//! Admin Session Entity
//!
//! Stateless admin session: every field lives in the signed cookie payload,
//! nothing is kept server-side.

use platform::crypto::{from_base64_url, random_bytes, to_base64_url, to_hex};

/// Payload format version
const PAYLOAD_VERSION: &str = "v1";

/// Nonce length in bytes
pub const NONCE_LEN: usize = 16;

/// Admin session claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    /// Issued at (Unix ms)
    pub issued_at_ms: i64,
    /// Expires at (Unix ms)
    pub expires_at_ms: i64,
    /// Random nonce, makes every token unique
    pub nonce: [u8; NONCE_LEN],
}

impl AdminSession {
    /// Create a session starting at `now_ms`
    pub fn new(now_ms: i64, ttl_ms: i64) -> Self {
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&random_bytes(NONCE_LEN));
        Self {
            issued_at_ms: now_ms,
            expires_at_ms: now_ms.saturating_add(ttl_ms),
            nonce,
        }
    }

    /// Encoded payload: base64url of `v1:{issued}:{expires}:{nonce_hex}`
    pub fn to_payload(&self) -> String {
        let plain = format!(
            "{}:{}:{}:{}",
            PAYLOAD_VERSION,
            self.issued_at_ms,
            self.expires_at_ms,
            to_hex(&self.nonce)
        );
        to_base64_url(plain.as_bytes())
    }

    /// Decode a payload produced by [`AdminSession::to_payload`]
    pub fn from_payload(payload: &str) -> Option<Self> {
        let bytes = from_base64_url(payload).ok()?;
        let plain = std::str::from_utf8(&bytes).ok()?;

        let mut parts = plain.split(':');
        if parts.next()? != PAYLOAD_VERSION {
            return None;
        }
        let issued_at_ms = parts.next()?.parse().ok()?;
        let expires_at_ms = parts.next()?.parse().ok()?;
        let nonce_hex = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let nonce_bytes = hex::decode(nonce_hex).ok()?;
        let nonce: [u8; NONCE_LEN] = nonce_bytes.try_into().ok()?;

        Some(Self {
            issued_at_ms,
            expires_at_ms,
            nonce,
        })
    }

    /// Whether the session has expired as of `now_ms`
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_decodes_to_same_claims() {
        let session = AdminSession::new(1_000, 500);
        assert_eq!(session.expires_at_ms, 1_500);

        let decoded = AdminSession::from_payload(&session.to_payload()).unwrap();
        assert_eq!(decoded, session);
    }

    #[test]
    fn test_nonce_makes_payloads_unique() {
        let a = AdminSession::new(1_000, 500);
        let b = AdminSession::new(1_000, 500);
        assert_ne!(a.to_payload(), b.to_payload());
    }

    #[test]
    fn test_expiry_boundary() {
        let session = AdminSession::new(1_000, 500);
        assert!(!session.is_expired_at(1_499));
        assert!(session.is_expired_at(1_500));
    }

    #[test]
    fn test_from_payload_rejects_garbage() {
        assert!(AdminSession::from_payload("").is_none());
        assert!(AdminSession::from_payload("!!!").is_none());

        let wrong_version = to_base64_url(b"v0:1:2:00000000000000000000000000000000");
        assert!(AdminSession::from_payload(&wrong_version).is_none());

        let short_nonce = to_base64_url(b"v1:1:2:abcd");
        assert!(AdminSession::from_payload(&short_nonce).is_none());

        let extra = to_base64_url(b"v1:1:2:00000000000000000000000000000000:x");
        assert!(AdminSession::from_payload(&extra).is_none());
    }
}
