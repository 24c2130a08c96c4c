//! In-memory key-value adapter.

use crate::KeyValueStore;
use anyhow::Result;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Process-local [`KeyValueStore`]. Values are dropped with the store.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put_raw(&self, key: &str, data: &[u8]) -> Result<()> {
        self.entries.write().insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    fn list_keys(&self, prefix: Option<&str>) -> Result<Vec<String>> {
        let entries = self.entries.read();
        Ok(entries
            .keys()
            .filter(|key| prefix.is_none_or(|p| key.starts_with(p)))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_behaves_like_a_slot_map() {
        let store = MemoryKvStore::new();
        assert!(store.is_empty());

        store.put_raw("workspace_files_docs", b"[]").unwrap();
        store.put_raw("workspace_files_dev", b"[]").unwrap();
        store.put_raw("current_user", b"{}").unwrap();
        assert_eq!(store.len(), 3);

        let keys = store.list_keys(Some("workspace_files_")).unwrap();
        assert_eq!(keys, vec!["workspace_files_dev", "workspace_files_docs"]);

        assert!(store.delete("current_user").unwrap());
        assert!(store.get_raw("current_user").unwrap().is_none());
    }
}
