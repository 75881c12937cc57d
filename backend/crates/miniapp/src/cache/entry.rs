//! Cache entry envelope

use serde::{Deserialize, Serialize};

/// Stored value with its write time and lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    /// Write time (Unix ms)
    pub timestamp: i64,
    /// Lifetime in ms; `None` never expires
    pub ttl: Option<i64>,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T, timestamp: i64, ttl: Option<i64>) -> Self {
        Self {
            data,
            timestamp,
            ttl,
        }
    }

    /// Expired once strictly more than `ttl` ms have passed
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        match self.ttl {
            Some(ttl) => now_ms.saturating_sub(self.timestamp) > ttl,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let entry = CacheEntry::new("v", 1_000, Some(500));
        assert!(!entry.is_expired_at(1_499));
        assert!(!entry.is_expired_at(1_500));
        assert!(entry.is_expired_at(1_501));
    }

    #[test]
    fn test_no_ttl_never_expires() {
        let entry = CacheEntry::new(1u8, 0, None);
        assert!(!entry.is_expired_at(i64::MAX));
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(CacheEntry::new(vec![1, 2], 10, Some(5))).unwrap();
        assert_eq!(json, serde_json::json!({ "data": [1, 2], "timestamp": 10, "ttl": 5 }));
    }
}
