//! WorkHub core: sessions, workspace registry, file registry and the view
//! controller, backed by a pluggable key-value adapter.

pub mod config;
pub mod content;
pub mod credentials;
pub mod error;
pub mod models;
pub mod seed;
pub mod services;
pub mod storage;
pub mod view;

pub use workhub_storage::paths;

pub use config::HubConfig;
pub use error::{HubError, HubResult};
pub use models::*;
pub use view::{Screen, View};

use content::ContentCache;
use credentials::CredentialDirectory;
use storage::Storage;
use tracing::info;

/// Application state for one client session.
///
/// Holds the persisted stores plus the in-memory session, the current view
/// and the transient content cache. Mutations go through the functions in
/// [`services`] and [`view`].
pub struct WorkHub {
    pub storage: Storage,
    config: HubConfig,
    credentials: CredentialDirectory,
    session: Option<User>,
    view: View,
    content: ContentCache,
}

impl WorkHub {
    /// Open the hub on the redb database at `db_path`.
    pub fn open(db_path: &str, config: HubConfig) -> HubResult<Self> {
        let storage = Storage::new(db_path)?;
        Self::with_storage(storage, config)
    }

    /// Open the hub on a process-local store.
    pub fn in_memory(config: HubConfig) -> HubResult<Self> {
        Self::with_storage(Storage::in_memory(), config)
    }

    pub fn with_storage(storage: Storage, config: HubConfig) -> HubResult<Self> {
        config.validate()?;
        seed::ensure_seeded(&storage)?;

        let session = Self::restore_session(&storage)?;
        let view = match &session {
            Some(_) => View::WorkspaceList,
            None => View::LoggedOut,
        };

        info!(
            signed_in = session.as_ref().map(|u| u.username.as_str()),
            "Initializing WorkHub"
        );

        Ok(Self {
            storage,
            config,
            credentials: CredentialDirectory::demo(),
            session,
            view,
            content: ContentCache::new(),
        })
    }

    /// Replace the credential directory used by login.
    pub fn with_credentials(mut self, credentials: CredentialDirectory) -> Self {
        self.credentials = credentials;
        self
    }

    /// Reload the persisted session against the live roster.
    fn restore_session(storage: &Storage) -> HubResult<Option<User>> {
        let Some(saved) = storage.session.load()? else {
            return Ok(None);
        };
        let users = storage.users.list()?;
        match users.into_iter().find(|u| u.id == saved.id) {
            Some(live) => {
                if live != saved {
                    storage.session.save(&live)?;
                }
                Ok(Some(live))
            }
            None => {
                storage.session.clear()?;
                Ok(None)
            }
        }
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref()
    }

    /// The view as last set. Use [`view::current_view`] for the guarded one.
    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn credentials(&self) -> &CredentialDirectory {
        &self.credentials
    }

    pub(crate) fn set_session(&mut self, user: Option<User>) {
        self.session = user;
    }

    pub(crate) fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub(crate) fn content(&self) -> &ContentCache {
        &self.content
    }

    pub(crate) fn content_mut(&mut self) -> &mut ContentCache {
        &mut self.content
    }
}
