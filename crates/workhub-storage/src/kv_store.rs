//! KV store storage - durable key-value slots backed by redb.

use crate::{KeyValueStore, SimpleStorage};
use anyhow::Result;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::sync::Arc;

const KV_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv_store");

/// KV store storage with byte-level API.
#[derive(Debug, Clone)]
pub struct KvStoreStorage {
    db: Arc<Database>,
}

impl KvStoreStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        <Self as SimpleStorage>::ensure_table(&db)?;
        Ok(Self { db })
    }

    /// List all keys with optional prefix filter.
    pub fn list_keys(&self, prefix: Option<&str>) -> Result<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;
        let mut keys = Vec::new();

        for entry in table.iter()? {
            let (key, _) = entry?;
            let key_str = key.value();
            if prefix.is_none_or(|p| key_str.starts_with(p)) {
                keys.push(key_str.to_string());
            }
        }

        Ok(keys)
    }
}

impl SimpleStorage for KvStoreStorage {
    const TABLE: TableDefinition<'static, &'static str, &'static [u8]> = KV_TABLE;

    fn db(&self) -> &Arc<Database> {
        &self.db
    }
}

impl KeyValueStore for KvStoreStorage {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        <Self as SimpleStorage>::get_raw(self, key)
    }

    fn put_raw(&self, key: &str, data: &[u8]) -> Result<()> {
        <Self as SimpleStorage>::put_raw(self, key, data)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        <Self as SimpleStorage>::delete(self, key)
    }

    fn list_keys(&self, prefix: Option<&str>) -> Result<Vec<String>> {
        KvStoreStorage::list_keys(self, prefix)
    }
}
