//! JSON File Store
//!
//! Persistent local store. The whole map is kept in memory and rewritten to
//! disk on every change through a temp file and rename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::store::CacheStore;
use crate::error::CacheError;

/// File-backed cache store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<Vec<(String, String)>>,
}

impl FileStore {
    /// Open a store, loading existing entries
    ///
    /// A missing file starts empty; a corrupt file is discarded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();

        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Discarding corrupt cache file");
                Vec::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &[(String, String)]) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec(entries)?).map_err(write_error)?;
        fs::rename(&tmp, &self.path).map_err(write_error)?;
        Ok(())
    }
}

/// A full disk is the file store's quota
fn write_error(err: io::Error) -> CacheError {
    match err.kind() {
        io::ErrorKind::StorageFull | io::ErrorKind::QuotaExceeded => CacheError::QuotaExceeded,
        _ => CacheError::Io(err),
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let mut next = entries.clone();
        match next.iter().position(|(k, _)| k == key) {
            Some(i) => next[i].1 = value,
            None => next.push((key.to_string(), value)),
        }

        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|(k, _)| k != key);
        if entries.len() != before {
            if let Err(e) = self.persist(&entries) {
                tracing::debug!(error = %e, "Failed to persist cache removal");
            }
        }
    }

    fn keys(&self) -> Vec<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::crypto::{random_bytes, to_hex};

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("miniapp-cache-{}", to_hex(&random_bytes(8))))
            .join("cache.json")
    }

    #[test]
    fn test_entries_survive_reopen() {
        let path = temp_path();

        let store = FileStore::open(&path).unwrap();
        store.set("origin:a", "1".into()).unwrap();
        store.set("origin:b", "2".into()).unwrap();
        store.remove("origin:a");
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("origin:a"), None);
        assert_eq!(reopened.get("origin:b"), Some("2".to_string()));
        assert_eq!(reopened.keys(), vec!["origin:b".to_string()]);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_full_disk_is_quota_exceeded() {
        assert!(matches!(
            write_error(io::Error::from(io::ErrorKind::StorageFull)),
            CacheError::QuotaExceeded
        ));
        assert!(matches!(
            write_error(io::Error::from(io::ErrorKind::PermissionDenied)),
            CacheError::Io(_)
        ));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"{not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.keys().is_empty());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
