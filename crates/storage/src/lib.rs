#![forbid(unsafe_code)]

pub mod content_source;
pub mod keys;
pub mod repository;
pub mod sqlite;

pub use keys::{Namespace, StorageKey};
pub use repository::{DetachedStore, InMemoryStore, KeyValueStore, Storage, StorageError};
