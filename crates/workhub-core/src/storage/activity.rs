use std::sync::Arc;
use workhub_storage::KeyValueStore;

use super::{ACTIVITY_KEY, load_json, save_json};
use crate::error::HubResult;
use crate::models::ActivityLogEntry;

/// Append-only activity log, capped by entry count.
#[derive(Clone)]
pub struct ActivityStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ActivityStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub fn load(&self) -> HubResult<Option<Vec<ActivityLogEntry>>> {
        load_json(self.kv.as_ref(), ACTIVITY_KEY)
    }

    /// Entries in insertion order.
    pub fn list(&self) -> HubResult<Vec<ActivityLogEntry>> {
        Ok(self.load()?.unwrap_or_default())
    }

    pub fn save(&self, entries: &[ActivityLogEntry]) -> HubResult<()> {
        save_json(self.kv.as_ref(), ACTIVITY_KEY, entries)
    }

    /// Append an entry, dropping the oldest ones beyond `limit`.
    pub fn append(&self, entry: ActivityLogEntry, limit: usize) -> HubResult<()> {
        let mut entries = self.list()?;
        entries.push(entry);
        if entries.len() > limit {
            let overflow = entries.len() - limit;
            entries.drain(..overflow);
        }
        self.save(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityAction;
    use chrono::Utc;
    use workhub_storage::MemoryKvStore;

    fn entry(id: usize) -> ActivityLogEntry {
        ActivityLogEntry {
            id: id.to_string(),
            username: "admin".to_string(),
            action: ActivityAction::Login,
            workspace: String::new(),
            timestamp: Utc::now(),
            details: "User logged in".to_string(),
        }
    }

    #[test]
    fn test_append_caps_oldest_first() {
        let store = ActivityStore::new(Arc::new(MemoryKvStore::new()));
        for i in 0..5 {
            store.append(entry(i), 3).unwrap();
        }

        let ids: Vec<_> = store.list().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
    }
}
