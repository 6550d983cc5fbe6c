use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use daily_core::progress::PersistedShape;
use storage::{KeyValueStore, StorageKey};

/// Outcome of a fire-and-forget write.
///
/// Never an error: callers may log or show a hint, but the view continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    /// No durable store in this context; nothing was written.
    Unavailable,
    /// The store rejected the write (e.g. quota exceeded).
    Failed,
}

impl SaveStatus {
    #[must_use]
    pub fn is_saved(self) -> bool {
        matches!(self, SaveStatus::Saved)
    }
}

/// A freshly mutated record plus whether it reached the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate<T> {
    pub progress: T,
    pub status: SaveStatus,
}

/// JSON persistence of progress records over a `KeyValueStore`.
///
/// Reads return the empty default on absence, unreadable JSON, a shape
/// mismatch, or a failing backend. Writes swallow backend errors and report
/// them as a `SaveStatus`.
#[derive(Clone)]
pub struct ProgressStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.kv.is_available()
    }

    pub async fn load<T>(&self, key: &StorageKey) -> T
    where
        T: DeserializeOwned + PersistedShape + Default,
    {
        let raw = match self.kv.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(err) => {
                warn!(%key, error = %err, "progress read failed, using empty state");
                return T::default();
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(record) if record.is_well_formed() => record,
            Ok(_) => {
                debug!(%key, "persisted progress has an inconsistent shape, ignoring");
                T::default()
            }
            Err(err) => {
                debug!(%key, error = %err, "persisted progress is not valid, ignoring");
                T::default()
            }
        }
    }

    pub async fn save<T: Serialize>(&self, key: &StorageKey, record: &T) -> SaveStatus {
        if !self.kv.is_available() {
            return SaveStatus::Unavailable;
        }

        let raw = match serde_json::to_string(record) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%key, error = %err, "failed to encode progress");
                return SaveStatus::Failed;
            }
        };

        match self.kv.set(key, &raw).await {
            Ok(()) => SaveStatus::Saved,
            Err(err) => {
                warn!(%key, error = %err, "failed to persist progress");
                SaveStatus::Failed
            }
        }
    }

    /// Removes the record under `key`. An absent key is a successful no-op.
    pub async fn remove(&self, key: &StorageKey) -> SaveStatus {
        if !self.kv.is_available() {
            return SaveStatus::Unavailable;
        }

        match self.kv.remove(key).await {
            Ok(()) => SaveStatus::Saved,
            Err(err) => {
                warn!(%key, error = %err, "failed to remove progress");
                SaveStatus::Failed
            }
        }
    }
}
