//! WorkHub Storage - Low-level persistence layer
//!
//! This crate provides the byte-level key-value persistence used by
//! workhub-core. Values are opaque bytes; the core crate owns serialization.
//!
//! # Adapters
//!
//! - [`KvStoreStorage`] - durable redb table (`kv_store`)
//! - [`MemoryKvStore`] - process-local map, nothing survives a restart
//!
//! Both implement [`KeyValueStore`], which is the only seam the core crate
//! depends on. Swapping the backend is a constructor change.

pub mod kv_store;
pub mod memory;
pub mod paths;
pub mod simple_storage;

use anyhow::Result;
use redb::Database;
use std::path::Path;
use std::sync::Arc;

pub use kv_store::KvStoreStorage;
pub use memory::MemoryKvStore;
pub use simple_storage::SimpleStorage;

/// Persistence adapter for whole-value key-value slots.
///
/// Writes replace the full value stored under a key; there is no partial
/// update or merge.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw bytes stored under `key`.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the value stored under `key`.
    fn put_raw(&self, key: &str, data: &[u8]) -> Result<()>;

    /// Remove `key`, returns true if it existed.
    fn delete(&self, key: &str) -> Result<bool>;

    /// List keys, optionally restricted to a prefix.
    fn list_keys(&self, prefix: Option<&str>) -> Result<Vec<String>>;
}

/// Open (or create) the redb database at `path` and return its KV adapter.
pub fn open_kv_store(path: impl AsRef<Path>) -> Result<KvStoreStorage> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let db = Arc::new(Database::create(path)?);
    tracing::debug!(path = %path.display(), "Opened key-value database");
    KvStoreStorage::new(db)
}
