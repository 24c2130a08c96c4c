//! View controller.
//!
//! The hub remembers one [`View`]. Transitions move between views, and every
//! read goes through [`current_view`], which re-checks the view against the
//! live session and registry before anything is rendered.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{HubError, HubResult};
use crate::models::{AdminOverview, User, WorkspaceConfig, WorkspaceFile, WorkspaceStats};
use crate::services::{activity, auth, files, workspaces};
use crate::WorkHub;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    LoggedOut,
    WorkspaceList,
    WorkspaceDetail { workspace_id: String },
    AdminPanel,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::LoggedOut => f.write_str("logged out"),
            View::WorkspaceList => f.write_str("workspace list"),
            View::WorkspaceDetail { workspace_id } => write!(f, "workspace {}", workspace_id),
            View::AdminPanel => f.write_str("admin panel"),
        }
    }
}

/// Badge on a workspace card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessBadge {
    ViewOnly,
    FullAccess,
}

impl AccessBadge {
    pub fn for_user(user: &User) -> Self {
        if user.role.can_edit() {
            AccessBadge::FullAccess
        } else {
            AccessBadge::ViewOnly
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccessBadge::ViewOnly => "View Only",
            AccessBadge::FullAccess => "Full Access",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceCard {
    pub workspace: WorkspaceConfig,
    pub badge: AccessBadge,
}

/// Which file actions the user is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileControls {
    pub upload: bool,
    pub delete: bool,
    pub download: bool,
}

impl FileControls {
    pub fn for_user(user: &User) -> Self {
        let can_edit = user.role.can_edit();
        Self {
            upload: can_edit,
            delete: can_edit,
            download: true,
        }
    }
}

/// Everything needed to render the current view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Login,
    WorkspaceGrid {
        user: User,
        cards: Vec<WorkspaceCard>,
        can_manage: bool,
    },
    FileManager {
        user: User,
        workspace: WorkspaceConfig,
        files: Vec<WorkspaceFile>,
        controls: FileControls,
        stats: WorkspaceStats,
    },
    AdminPanel {
        user: User,
        overview: AdminOverview,
    },
}

/// The stored view after re-checking it against the live state.
///
/// A signed-out hub is always `LoggedOut`. A detail view whose workspace was
/// revoked or deleted falls back to the list, and so does the admin panel
/// once the user is no longer an admin.
pub fn current_view(hub: &mut WorkHub) -> HubResult<View> {
    let stored = hub.view().clone();
    let guarded = match (hub.current_user(), &stored) {
        (None, _) => View::LoggedOut,
        (Some(_), View::LoggedOut) => View::WorkspaceList,
        (Some(user), View::WorkspaceDetail { workspace_id }) => {
            let defined = hub.storage.registry.get(workspace_id)?.is_some();
            if defined && user.has_access(workspace_id) {
                stored.clone()
            } else {
                View::WorkspaceList
            }
        }
        (Some(user), View::AdminPanel) if !user.role.is_admin() => View::WorkspaceList,
        (Some(_), view) => view.clone(),
    };

    if guarded != stored {
        debug!(from = %stored, to = %guarded, "View collapsed by guard");
        hub.set_view(guarded.clone());
    }
    Ok(guarded)
}

pub fn open_workspace(hub: &mut WorkHub, workspace_id: &str) -> HubResult<View> {
    let user = auth::require_user(hub)?;
    let view = current_view(hub)?;
    if view != View::WorkspaceList {
        return Err(HubError::InvalidTransition(format!(
            "cannot open a workspace from the {}",
            view
        )));
    }
    workspaces::accessible_workspace(hub, &user, workspace_id)?;

    let next = View::WorkspaceDetail {
        workspace_id: workspace_id.to_string(),
    };
    hub.set_view(next.clone());
    Ok(next)
}

/// Return to the workspace list from a workspace or the admin panel.
pub fn back(hub: &mut WorkHub) -> HubResult<View> {
    match current_view(hub)? {
        View::WorkspaceDetail { .. } | View::AdminPanel => {
            hub.set_view(View::WorkspaceList);
            Ok(View::WorkspaceList)
        }
        other => Err(HubError::InvalidTransition(format!(
            "nothing to go back to from the {}",
            other
        ))),
    }
}

pub fn open_admin_panel(hub: &mut WorkHub) -> HubResult<View> {
    auth::require_admin(hub)?;
    let view = current_view(hub)?;
    if view != View::WorkspaceList {
        return Err(HubError::InvalidTransition(format!(
            "cannot open the admin panel from the {}",
            view
        )));
    }
    hub.set_view(View::AdminPanel);
    Ok(View::AdminPanel)
}

/// Build the screen model of the current view.
///
/// `search` is the search box of whichever screen is showing.
pub fn screen(hub: &mut WorkHub, search: &str) -> HubResult<Screen> {
    let view = current_view(hub)?;
    let Some(user) = hub.current_user().cloned() else {
        return Ok(Screen::Login);
    };

    let screen = match view {
        View::LoggedOut => Screen::Login,
        View::WorkspaceList => {
            let badge = AccessBadge::for_user(&user);
            let cards = workspaces::visible_workspaces(hub, search)?
                .into_iter()
                .map(|workspace| WorkspaceCard { workspace, badge })
                .collect();
            Screen::WorkspaceGrid {
                can_manage: user.role.is_admin(),
                cards,
                user,
            }
        }
        View::WorkspaceDetail { workspace_id } => Screen::FileManager {
            workspace: workspaces::get_workspace(hub, &workspace_id)?,
            files: files::list_files(hub, &workspace_id, search)?,
            stats: files::workspace_stats(hub, &workspace_id)?,
            controls: FileControls::for_user(&user),
            user,
        },
        View::AdminPanel => Screen::AdminPanel {
            overview: activity::admin_overview(hub, search)?,
            user,
        },
    };
    Ok(screen)
}
