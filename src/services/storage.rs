//! Durable key/value storage for client-side session data
//!
//! Mirrors the browser's local storage: string keys, string values,
//! synchronous access. The file-backed store keeps a single JSON object on
//! disk and rewrites it whole on every mutation. A file that no longer
//! decodes is reported by reads and replaced by the next mutation.

use std::{
    collections::BTreeMap,
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::error::{AppError, AppResult};

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "jwt_token";
/// Storage key of the cached user profile
pub const USER_KEY: &str = "user";

/// Synchronous string key/value store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Store persisted as a JSON object in a single file
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> AppResult<BTreeMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::Storage(io::Error::new(
                    ErrorKind::InvalidData,
                    format!("{} is corrupt: {}", self.path.display(), e),
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> AppResult<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AppError::Internal("Storage lock poisoned".to_string()))?;
        let mut entries = match self.read_all() {
            Err(AppError::Storage(e)) if e.kind() == ErrorKind::InvalidData => {
                tracing::warn!("Discarding unreadable storage: {}", e);
                BTreeMap::new()
            }
            other => other?,
        };
        f(&mut entries);
        self.write_all(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AppError::Internal("Storage lock poisoned".to_string()))?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        tracing::debug!("Storing key {} in {}", key, self.path.display());
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        tracing::debug!("Removing key {} from {}", key, self.path.display());
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

/// In-memory store, used when nothing should outlive the process
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> AppResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::Internal("Storage lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("book-buddy-{}", uuid::Uuid::new_v4()))
            .join("storage.json")
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let path = temp_path();
        let store = FileStore::new(&path);
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);

        store.set(TOKEN_KEY, "abc").unwrap();
        store.set(USER_KEY, "{}").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        reopened.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_KEY).unwrap().as_deref(), Some("{}"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    fn corrupt_store() -> (FileStore, PathBuf) {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, br#"{"jwt_token": "abc""#).unwrap();
        (FileStore::new(&path), path)
    }

    #[test]
    fn test_file_store_reports_corrupt_file_as_storage_error() {
        let (store, path) = corrupt_store();

        let err = store.get(TOKEN_KEY).unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(err.to_string().starts_with("Storage error:"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_mutation_replaces_corrupt_file() {
        let (store, path) = corrupt_store();

        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);

        store.set(USER_KEY, "{}").unwrap();
        assert_eq!(store.get(USER_KEY).unwrap().as_deref(), Some("{}"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
