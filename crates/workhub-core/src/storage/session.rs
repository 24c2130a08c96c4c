use std::sync::Arc;
use tracing::warn;
use workhub_storage::KeyValueStore;

use super::{SESSION_KEY, save_json};
use crate::error::HubResult;
use crate::models::User;

/// The persisted session slot.
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the persisted session user.
    ///
    /// A malformed slot is reported and treated as logged out.
    pub fn load(&self) -> HubResult<Option<User>> {
        let Some(bytes) = self.kv.get_raw(SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable session slot");
                Ok(None)
            }
        }
    }

    pub fn save(&self, user: &User) -> HubResult<()> {
        save_json(self.kv.as_ref(), SESSION_KEY, user)
    }

    pub fn clear(&self) -> HubResult<()> {
        self.kv.delete(SESSION_KEY)?;
        Ok(())
    }
}
