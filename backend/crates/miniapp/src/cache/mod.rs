//! Origin-scoped TTL cache
//!
//! Best-effort: storage or serialization problems are logged at `debug` and
//! never fail the caller.

pub mod clock;
pub mod entry;
pub mod file;
pub mod store;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use file::FileStore;
pub use store::{CacheStore, MemoryStore};

use crate::error::CacheError;

/// TTL cache over a [`CacheStore`]
///
/// Every key is stored as `<origin>:<key>`. `get_or_set` takes no lock:
/// concurrent misses both fetch and the last write wins.
pub struct TtlCache<S, C = SystemClock> {
    store: S,
    clock: C,
    prefix: String,
}

impl<S: CacheStore> TtlCache<S, SystemClock> {
    pub fn new(origin: &str, store: S) -> Self {
        Self::with_clock(origin, store, SystemClock)
    }
}

impl<S: CacheStore, C: Clock> TtlCache<S, C> {
    pub fn with_clock(origin: &str, store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            prefix: format!("{origin}:"),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Fresh value for `key`, evicting it if expired or undecodable
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let scoped = self.scoped(key);
        let raw = self.store.get(&scoped)?;

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(key = %scoped, error = %e, "Evicting undecodable cache entry");
                self.store.remove(&scoped);
                return None;
            }
        };

        if entry.is_expired_at(self.clock.now_ms()) {
            self.store.remove(&scoped);
            return None;
        }

        Some(entry.data)
    }

    /// Store `data`; `ttl = None` never expires
    pub fn set<T: Serialize>(&self, key: &str, data: &T, ttl: Option<Duration>) {
        let scoped = self.scoped(key);
        let entry = CacheEntry::new(
            data,
            self.clock.now_ms(),
            ttl.map(|ttl| i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX)),
        );

        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(key = %scoped, error = %e, "Cache entry not serializable");
                return;
            }
        };

        match self.store.set(&scoped, raw.clone()) {
            Ok(()) => {}
            Err(CacheError::QuotaExceeded) => {
                if let Some(victim) = self.first_own_key() {
                    self.store.remove(&victim);
                }
                if let Err(e) = self.store.set(&scoped, raw) {
                    tracing::debug!(key = %scoped, error = %e, "Cache write dropped");
                }
            }
            Err(e) => {
                tracing::debug!(key = %scoped, error = %e, "Cache write dropped");
            }
        }
    }

    pub fn remove(&self, key: &str) {
        self.store.remove(&self.scoped(key));
    }

    /// Remove every key of this origin; other origins are untouched
    pub fn clear(&self) {
        for key in self.own_keys() {
            self.store.remove(&key);
        }
    }

    /// Cached value, or the fetcher's result stored under `key`
    ///
    /// A fetch error is returned as-is and nothing is cached.
    pub async fn get_or_set<T, E, F, Fut>(
        &self,
        key: &str,
        fetcher: F,
        ttl: Option<Duration>,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.get(key) {
            return Ok(cached);
        }

        let fresh = fetcher().await?;
        self.set(key, &fresh, ttl);
        Ok(fresh)
    }

    fn own_keys(&self) -> Vec<String> {
        self.store
            .keys()
            .into_iter()
            .filter(|k| k.starts_with(&self.prefix))
            .collect()
    }

    fn first_own_key(&self) -> Option<String> {
        self.own_keys().into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const ORIGIN: &str = "https://app.example";

    fn cache() -> (TtlCache<MemoryStore, Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000));
        (
            TtlCache::with_clock(ORIGIN, MemoryStore::new(), clock.clone()),
            clock,
        )
    }

    #[test]
    fn test_ttl_boundary() {
        let (cache, clock) = cache();
        cache.set("billing", &42u32, Some(Duration::from_millis(500)));

        clock.set(1_499);
        assert_eq!(cache.get::<u32>("billing"), Some(42));
        clock.set(1_500);
        assert_eq!(cache.get::<u32>("billing"), Some(42));
        clock.set(1_501);
        assert_eq!(cache.get::<u32>("billing"), None);

        // Expired entry was evicted
        assert!(cache.store().keys().is_empty());
    }

    #[test]
    fn test_no_ttl_never_expires() {
        let (cache, clock) = cache();
        cache.set("k", &"v", None);
        clock.advance(i64::MAX / 2);
        assert_eq!(cache.get::<String>("k"), Some("v".to_string()));
    }

    #[test]
    fn test_huge_ttl_does_not_wrap() {
        let (cache, clock) = cache();
        cache.set("k", &1u8, Some(Duration::from_secs(u64::MAX)));
        clock.advance(i64::MAX / 2);
        assert_eq!(cache.get::<u8>("k"), Some(1));
    }

    #[test]
    fn test_set_overwrites() {
        let (cache, _) = cache();
        cache.set("k", &1, None);
        cache.set("k", &2, None);
        assert_eq!(cache.get::<i32>("k"), Some(2));
    }

    #[test]
    fn test_undecodable_entry_is_evicted() {
        let (cache, _) = cache();
        cache.store().set(&format!("{ORIGIN}:bad"), "{oops".into()).unwrap();
        assert_eq!(cache.get::<i32>("bad"), None);
        assert!(cache.store().get(&format!("{ORIGIN}:bad")).is_none());

        cache.set("typed", &"text", None);
        assert_eq!(cache.get::<i32>("typed"), None);
        assert!(cache.store().keys().is_empty());
    }

    #[test]
    fn test_keys_are_origin_scoped() {
        let store = Arc::new(MemoryStore::new());
        let a = TtlCache::new("https://a.example", store.clone());
        let b = TtlCache::new("https://b.example", store.clone());

        a.set("k", &1, None);
        b.set("k", &2, None);
        assert_eq!(a.get::<i32>("k"), Some(1));
        assert_eq!(b.get::<i32>("k"), Some(2));

        a.clear();
        assert_eq!(a.get::<i32>("k"), None);
        assert_eq!(b.get::<i32>("k"), Some(2));
        assert_eq!(store.keys(), vec!["https://b.example:k".to_string()]);
    }

    #[test]
    fn test_quota_evicts_first_key_and_retries_once() {
        let clock = Arc::new(ManualClock::new(0));
        // Room for two small entries only
        let cache = TtlCache::with_clock("o", MemoryStore::with_quota(100), clock);

        cache.set("a", &1, None);
        cache.set("b", &2, None);
        cache.set("c", &3, None);

        assert_eq!(cache.get::<i32>("a"), None);
        assert_eq!(cache.get::<i32>("b"), Some(2));
        assert_eq!(cache.get::<i32>("c"), Some(3));
    }

    #[test]
    fn test_oversized_value_is_silently_dropped() {
        let cache = TtlCache::new("o", MemoryStore::with_quota(10));
        cache.set("huge", &"x".repeat(100), None);
        assert_eq!(cache.get::<String>("huge"), None);
    }

    #[tokio::test]
    async fn test_get_or_set_fetches_once() {
        let (cache, _) = cache();
        let mut calls = 0;

        let fetch = || {
            calls += 1;
            async { Ok(7) }
        };
        let first: Result<u32, ()> = cache.get_or_set("n", fetch, None).await;
        assert_eq!(first, Ok(7));

        let second: Result<u32, ()> = cache.get_or_set("n", || async { Ok(8) }, None).await;
        assert_eq!(second, Ok(7));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_get_or_set_error_is_not_cached() {
        let (cache, _) = cache();

        let result: Result<u32, &str> = cache
            .get_or_set("n", || async { Err("backend down") }, None)
            .await;
        assert_eq!(result, Err("backend down"));
        assert!(cache.store().keys().is_empty());
    }
}
