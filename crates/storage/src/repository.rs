use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::keys::StorageKey;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable string key-value store holding serialized progress records.
///
/// Adapters never interpret values. Removing an absent key succeeds.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Whether a durable store backs this adapter.
    fn is_available(&self) -> bool {
        true
    }

    /// Fetch the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    async fn set(&self, key: &StorageKey, value: &str) -> Result<(), StorageError>;

    /// Delete `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove(&self, key: &StorageKey) -> Result<(), StorageError>;
}

/// In-memory store for tests and prototyping.
///
/// An optional quota bounds the total size of stored keys and values, so
/// tests can exercise rejected writes.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota: Some(limit),
        }
    }

    /// Number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.len())
    }

    /// Whether the store holds no keys.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        self.len().map(|len| len == 0)
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key.to_string()).cloned())
    }

    async fn set(&self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        let key = key.to_string();
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if let Some(limit) = self.quota {
            let others: usize = guard
                .iter()
                .filter(|(k, _)| **k != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }

        guard.insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &StorageKey) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&key.to_string());
        Ok(())
    }
}

/// Stand-in used where no durable store exists (e.g. server-side rendering).
///
/// Reads find nothing; writes and removals are accepted and dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedStore;

#[async_trait]
impl KeyValueStore for DetachedStore {
    fn is_available(&self) -> bool {
        false
    }

    async fn get(&self, _key: &StorageKey) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn set(&self, _key: &StorageKey, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    async fn remove(&self, _key: &StorageKey) -> Result<(), StorageError> {
        Ok(())
    }
}

/// The key-value backend behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub kv: Arc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            kv: Arc::new(InMemoryStore::new()),
        }
    }

    #[must_use]
    pub fn detached() -> Self {
        Self {
            kv: Arc::new(DetachedStore),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daily_core::model::{Scope, Slug};

    fn key() -> StorageKey {
        StorageKey::checklist(&Slug::new("git-workflow").unwrap())
    }

    #[tokio::test]
    async fn set_get_remove_round_trip() {
        let store = InMemoryStore::new();
        store.set(&key(), r#"{"a":true}"#).await.unwrap();
        assert_eq!(store.get(&key()).await.unwrap().as_deref(), Some(r#"{"a":true}"#));

        store.remove(&key()).await.unwrap();
        assert_eq!(store.get(&key()).await.unwrap(), None);
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn removing_absent_key_succeeds() {
        let store = InMemoryStore::new();
        store.remove(&key()).await.unwrap();
        store.remove(&key()).await.unwrap();
    }

    #[tokio::test]
    async fn quota_rejects_oversized_writes() {
        let store = InMemoryStore::with_quota(64);
        let err = store.set(&key(), &"x".repeat(64)).await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 64, .. }));
        assert_eq!(store.get(&key()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn quota_counts_replacement_once() {
        let interview = StorageKey::interview(&Scope::All);
        let budget = interview.to_string().len() + 10;
        let store = InMemoryStore::with_quota(budget);
        store.set(&interview, "0123456789").await.unwrap();
        store.set(&interview, "9876543210").await.unwrap();
    }

    #[tokio::test]
    async fn detached_store_reads_nothing() {
        let store = DetachedStore;
        assert!(!store.is_available());
        store.set(&key(), "{}").await.unwrap();
        assert_eq!(store.get(&key()).await.unwrap(), None);
    }
}
