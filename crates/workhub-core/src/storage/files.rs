use std::sync::Arc;
use workhub_storage::KeyValueStore;

use super::{files_key, load_json, save_json};
use crate::error::HubResult;
use crate::models::WorkspaceFile;

/// Per-workspace file lists under `workspace_files_{id}`.
#[derive(Clone)]
pub struct FileStore {
    kv: Arc<dyn KeyValueStore>,
}

impl FileStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the file list of a workspace. A missing key is an empty list.
    pub fn list(&self, workspace_id: &str) -> HubResult<Vec<WorkspaceFile>> {
        Ok(load_json(self.kv.as_ref(), &files_key(workspace_id))?.unwrap_or_default())
    }

    /// Replace the whole file list of a workspace.
    pub fn save(&self, workspace_id: &str, files: &[WorkspaceFile]) -> HubResult<()> {
        save_json(self.kv.as_ref(), &files_key(workspace_id), files)
    }

    /// Drop the file namespace of a workspace.
    pub fn remove(&self, workspace_id: &str) -> HubResult<bool> {
        Ok(self.kv.delete(&files_key(workspace_id))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FILES_KEY_PREFIX;
    use chrono::{TimeZone, Utc};
    use workhub_storage::MemoryKvStore;

    fn sample(id: &str) -> WorkspaceFile {
        WorkspaceFile {
            id: id.to_string(),
            name: format!("{id}.pdf"),
            size: 2048,
            mime_type: "application/pdf".to_string(),
            uploaded_by: "qa-manager".to_string(),
            uploaded_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            content: None,
        }
    }

    #[test]
    fn test_missing_list_is_empty() {
        let store = FileStore::new(Arc::new(MemoryKvStore::new()));
        assert!(store.list("qa").unwrap().is_empty());
    }

    #[test]
    fn test_timestamps_are_rfc3339_strings() {
        let kv = Arc::new(MemoryKvStore::new());
        let store = FileStore::new(kv.clone());
        store.save("qa", &[sample("f1")]).unwrap();

        let raw = kv.get_raw("workspace_files_qa").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(json[0]["uploaded_at"], "2024-03-01T09:30:00Z");

        let files = store.list("qa").unwrap();
        assert_eq!(files[0].uploaded_at, sample("f1").uploaded_at);
    }

    #[test]
    fn test_remove_namespace() {
        let kv = Arc::new(MemoryKvStore::new());
        let store = FileStore::new(kv.clone());
        store.save("qa", &[sample("f1")]).unwrap();
        store.save("dev", &[sample("f2")]).unwrap();

        assert!(store.remove("qa").unwrap());
        assert!(!store.remove("qa").unwrap());
        assert!(store.list("qa").unwrap().is_empty());
        assert_eq!(
            kv.list_keys(Some(FILES_KEY_PREFIX)).unwrap(),
            vec!["workspace_files_dev"]
        );
    }
}
