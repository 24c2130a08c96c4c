//! Transient file content.
//!
//! Uploaded bytes live here for the life of the process, keyed by file id.
//! Nothing in this module touches storage.

use std::collections::HashMap;

use crate::models::{ContentHandle, WorkspaceFile};

#[derive(Debug, Default)]
pub struct ContentCache {
    blobs: HashMap<String, (ContentHandle, Vec<u8>)>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `bytes` for `file_id` and return the handle that reaches them.
    pub fn register(&mut self, file_id: &str, bytes: Vec<u8>) -> ContentHandle {
        let handle = ContentHandle::generate();
        self.blobs
            .insert(file_id.to_string(), (handle.clone(), bytes));
        handle
    }

    pub fn handle(&self, file_id: &str) -> Option<&ContentHandle> {
        self.blobs.get(file_id).map(|(handle, _)| handle)
    }

    /// Bytes behind `handle`, if it is still live.
    pub fn resolve(&self, file_id: &str, handle: &ContentHandle) -> Option<&[u8]> {
        self.blobs
            .get(file_id)
            .filter(|(live, _)| live == handle)
            .map(|(_, bytes)| bytes.as_slice())
    }

    pub fn revoke(&mut self, file_id: &str) -> bool {
        self.blobs.remove(file_id).is_some()
    }

    /// Attach live handles to records loaded from storage.
    pub fn attach(&self, files: &mut [WorkspaceFile]) {
        for file in files {
            file.content = self.handle(&file.id).cloned();
        }
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_resolve_revoke() {
        let mut cache = ContentCache::new();
        let handle = cache.register("f1", b"hello".to_vec());

        assert_eq!(cache.resolve("f1", &handle), Some(&b"hello"[..]));
        assert!(handle.as_str().starts_with("blob:workhub/"));

        assert!(cache.revoke("f1"));
        assert!(cache.resolve("f1", &handle).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_stale_handle_does_not_resolve() {
        let mut cache = ContentCache::new();
        let old = cache.register("f1", b"v1".to_vec());
        let new = cache.register("f1", b"v2".to_vec());

        assert!(cache.resolve("f1", &old).is_none());
        assert_eq!(cache.resolve("f1", &new), Some(&b"v2"[..]));
        assert_eq!(cache.len(), 1);
    }
}
