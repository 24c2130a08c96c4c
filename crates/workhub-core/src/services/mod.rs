//! Operations on a [`WorkHub`](crate::WorkHub), grouped by concern.
//!
//! Every function re-checks the session and role it needs, so callers never
//! have to guard before invoking them.

pub mod activity;
pub mod auth;
pub mod files;
pub mod workspaces;

pub use activity::{admin_overview, admin_overview_at, list_activity};
pub use auth::{login, logout, require_admin, require_user};
pub use files::{delete_file, download_file, list_files, upload_files, workspace_stats};
pub use workspaces::{
    add_workspace, delete_workspace, get_workspace, list_users, list_workspaces,
    update_workspace, visible_workspaces, workspace_access,
};
