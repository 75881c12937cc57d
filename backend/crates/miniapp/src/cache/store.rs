//! Cache Store Trait and In-Memory Implementation
//!
//! String key/value capability the TTL cache is built on.

use std::sync::Mutex;

use crate::error::CacheError;

/// Key/value backing store
///
/// Keys enumerate in insertion order. A single `set` is atomic: readers
/// never see a partially written value.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Insert or overwrite
    ///
    /// ## Errors
    /// `QuotaExceeded` when the store cannot take the value.
    fn set(&self, key: &str, value: String) -> Result<(), CacheError>;

    fn remove(&self, key: &str);

    /// All keys, in enumeration order
    fn keys(&self) -> Vec<String>;
}

impl<S: CacheStore + ?Sized> CacheStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

/// In-memory store with an optional byte quota (keys plus values)
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<(String, String)>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Bytes currently used
    pub fn used_bytes(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let position = entries.iter().position(|(k, _)| k == key);

        if let Some(quota) = self.quota_bytes {
            let used: usize = entries.iter().map(|(k, v)| k.len() + v.len()).sum();
            let replaced = position.map_or(0, |i| entries[i].0.len() + entries[i].1.len());
            if used - replaced + key.len() + value.len() > quota {
                return Err(CacheError::QuotaExceeded);
            }
        }

        match position {
            Some(i) => entries[i].1 = value,
            None => entries.push((key.to_string(), value)),
        }
        Ok(())
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|(k, _)| k != key);
    }

    fn keys(&self) -> Vec<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        store.set("a", "1".into()).unwrap();
        store.set("b", "2".into()).unwrap();
        store.set("a", "3".into()).unwrap();

        assert_eq!(store.get("a"), Some("3".to_string()));
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);

        store.remove("a");
        assert_eq!(store.get("a"), None);
        assert_eq!(store.keys(), vec!["b".to_string()]);
    }

    #[test]
    fn test_quota() {
        let store = MemoryStore::with_quota(10);
        store.set("k1", "12345".into()).unwrap();
        assert_eq!(store.used_bytes(), 7);

        assert!(matches!(
            store.set("k2", "12345".into()),
            Err(CacheError::QuotaExceeded)
        ));

        // Overwrite only counts the new size
        store.set("k1", "12345678".into()).unwrap();
        assert_eq!(store.used_bytes(), 10);
    }
}
