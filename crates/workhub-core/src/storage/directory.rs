//! Workspace registry and user directory slots.

use std::sync::Arc;
use workhub_storage::KeyValueStore;

use super::{REGISTRY_KEY, USERS_KEY, load_json, save_json};
use crate::error::HubResult;
use crate::models::{User, WorkspaceConfig};

/// Ordered list of workspace definitions.
#[derive(Clone)]
pub struct RegistryStore {
    kv: Arc<dyn KeyValueStore>,
}

impl RegistryStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// `None` when the registry was never written.
    pub fn load(&self) -> HubResult<Option<Vec<WorkspaceConfig>>> {
        load_json(self.kv.as_ref(), REGISTRY_KEY)
    }

    pub fn list(&self) -> HubResult<Vec<WorkspaceConfig>> {
        Ok(self.load()?.unwrap_or_default())
    }

    pub fn get(&self, id: &str) -> HubResult<Option<WorkspaceConfig>> {
        Ok(self.list()?.into_iter().find(|w| w.id == id))
    }

    pub fn save(&self, workspaces: &[WorkspaceConfig]) -> HubResult<()> {
        save_json(self.kv.as_ref(), REGISTRY_KEY, workspaces)
    }
}

/// The user roster and each user's access list.
#[derive(Clone)]
pub struct UserStore {
    kv: Arc<dyn KeyValueStore>,
}

impl UserStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub fn load(&self) -> HubResult<Option<Vec<User>>> {
        load_json(self.kv.as_ref(), USERS_KEY)
    }

    pub fn list(&self) -> HubResult<Vec<User>> {
        Ok(self.load()?.unwrap_or_default())
    }

    pub fn find_by_username(&self, username: &str) -> HubResult<Option<User>> {
        Ok(self.list()?.into_iter().find(|u| u.username == username))
    }

    pub fn save(&self, users: &[User]) -> HubResult<()> {
        save_json(self.kv.as_ref(), USERS_KEY, users)
    }
}
