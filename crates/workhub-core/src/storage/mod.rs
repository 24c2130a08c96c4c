//! Storage layer with typed wrappers around workhub-storage.
//!
//! This module provides type-safe access to the key-value slots by wrapping
//! the byte-level [`KeyValueStore`] adapter with our models. Every value is
//! JSON and every write replaces the whole slot.

pub mod activity;
pub mod directory;
pub mod files;
pub mod session;

use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use workhub_storage::{KeyValueStore, MemoryKvStore};

use crate::error::HubResult;

pub use activity::ActivityStore;
pub use directory::{RegistryStore, UserStore};
pub use files::FileStore;
pub use session::SessionStore;

pub const SESSION_KEY: &str = "current_user";
pub const REGISTRY_KEY: &str = "workspace_registry";
pub const USERS_KEY: &str = "user_directory";
pub const ACTIVITY_KEY: &str = "activity_log";
pub const FILES_KEY_PREFIX: &str = "workspace_files_";

/// Key holding the file list of a workspace.
pub fn files_key(workspace_id: &str) -> String {
    format!("{}{}", FILES_KEY_PREFIX, workspace_id)
}

pub(crate) fn load_json<T: DeserializeOwned>(
    kv: &dyn KeyValueStore,
    key: &str,
) -> HubResult<Option<T>> {
    match kv.get_raw(key)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

pub(crate) fn save_json<T: Serialize + ?Sized>(
    kv: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> HubResult<()> {
    let bytes = serde_json::to_vec(value)?;
    kv.put_raw(key, &bytes)?;
    Ok(())
}

/// Central storage manager that wires every typed store to one adapter.
pub struct Storage {
    pub session: SessionStore,
    pub registry: RegistryStore,
    pub users: UserStore,
    pub files: FileStore,
    pub activity: ActivityStore,
}

impl Storage {
    /// Create a storage instance backed by the redb database at `path`.
    pub fn new(path: &str) -> Result<Self> {
        let kv = workhub_storage::open_kv_store(path)?;
        Ok(Self::with_store(Arc::new(kv)))
    }

    /// Create a storage instance that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryKvStore::new()))
    }

    pub fn with_store(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session: SessionStore::new(kv.clone()),
            registry: RegistryStore::new(kv.clone()),
            users: UserStore::new(kv.clone()),
            files: FileStore::new(kv.clone()),
            activity: ActivityStore::new(kv),
        }
    }
}
