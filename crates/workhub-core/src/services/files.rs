//! Per-workspace file registry.
//!
//! The file list of a workspace is one slot; every mutation rewrites it in
//! full. Bytes go to the in-process content cache, never to storage.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::activity;
use super::auth::require_user;
use super::workspaces::accessible_workspace;
use crate::error::{HubError, HubResult};
use crate::models::{
    AccessLevel, ActivityAction, UploadedFile, User, ValidationError, WorkspaceConfig,
    WorkspaceFile, WorkspaceStats,
};
use crate::WorkHub;

fn open(hub: &WorkHub, workspace_id: &str) -> HubResult<(User, WorkspaceConfig)> {
    let user = require_user(hub)?;
    let workspace = accessible_workspace(hub, &user, workspace_id)?;
    Ok((user, workspace))
}

fn require_editor(user: &User, action: &str) -> HubResult<()> {
    if user.role.can_edit() {
        Ok(())
    } else {
        Err(HubError::PermissionDenied(format!(
            "{} may not {} files",
            user.username, action
        )))
    }
}

/// Files of a workspace whose name matches `search`, in upload order.
pub fn list_files(hub: &WorkHub, workspace_id: &str, search: &str) -> HubResult<Vec<WorkspaceFile>> {
    open(hub, workspace_id)?;
    let mut files: Vec<_> = hub
        .storage
        .files
        .list(workspace_id)?
        .into_iter()
        .filter(|f| f.matches_search(search))
        .collect();
    hub.content().attach(&mut files);
    Ok(files)
}

/// Append the uploads to the workspace, authored by the signed-in user.
pub fn upload_files(
    hub: &mut WorkHub,
    workspace_id: &str,
    uploads: Vec<UploadedFile>,
) -> HubResult<Vec<WorkspaceFile>> {
    let (user, workspace) = open(hub, workspace_id)?;
    require_editor(&user, "upload")?;
    if uploads.is_empty() {
        return Err(ValidationError::new("files", "at least one file is required").into());
    }
    if let Some(blank) = uploads.iter().find(|u| u.name.trim().is_empty()) {
        debug!(size = blank.bytes.len(), "Rejected upload without a name");
        return Err(ValidationError::required("name").into());
    }

    let mut files = hub.storage.files.list(workspace_id)?;
    let now = Utc::now();
    let mut added = Vec::with_capacity(uploads.len());
    let mut blobs = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let file = WorkspaceFile {
            id: Uuid::new_v4().to_string(),
            name: upload.name,
            size: upload.bytes.len() as u64,
            mime_type: upload.mime_type,
            uploaded_by: user.username.clone(),
            uploaded_at: now,
            content: None,
        };
        blobs.push(upload.bytes);
        added.push(file);
    }
    files.extend(added.iter().cloned());
    hub.storage.files.save(workspace_id, &files)?;

    // Bytes are cached only once their records are stored.
    for (file, bytes) in added.iter_mut().zip(blobs) {
        file.content = Some(hub.content_mut().register(&file.id, bytes));
    }

    let names: Vec<&str> = added.iter().map(|f| f.name.as_str()).collect();
    activity::record(
        hub,
        ActivityAction::FileUpload,
        &workspace.title,
        format!("Uploaded {}", names.join(", ")),
    )?;
    info!(
        workspace = %workspace_id,
        count = added.len(),
        cached = hub.content().len(),
        "Files uploaded"
    );
    Ok(added)
}

pub fn delete_file(hub: &mut WorkHub, workspace_id: &str, file_id: &str) -> HubResult<WorkspaceFile> {
    let (user, workspace) = open(hub, workspace_id)?;
    require_editor(&user, "delete")?;

    let mut files = hub.storage.files.list(workspace_id)?;
    let index = files
        .iter()
        .position(|f| f.id == file_id)
        .ok_or_else(|| HubError::FileNotFound(file_id.to_string()))?;
    let removed = files.remove(index);
    hub.storage.files.save(workspace_id, &files)?;
    hub.content_mut().revoke(&removed.id);

    activity::record(
        hub,
        ActivityAction::FileDelete,
        &workspace.title,
        format!("Deleted {}", removed.name),
    )?;
    info!(workspace = %workspace_id, file = %removed.name, "File deleted");
    Ok(removed)
}

/// Record and bytes of a file. Fails with `ContentUnavailable` when the
/// content was uploaded by an earlier process.
pub fn download_file(
    hub: &WorkHub,
    workspace_id: &str,
    file_id: &str,
) -> HubResult<(WorkspaceFile, Vec<u8>)> {
    let (_, workspace) = open(hub, workspace_id)?;

    let mut file = hub
        .storage
        .files
        .list(workspace_id)?
        .into_iter()
        .find(|f| f.id == file_id)
        .ok_or_else(|| HubError::FileNotFound(file_id.to_string()))?;
    hub.content().attach(std::slice::from_mut(&mut file));

    let bytes = file
        .content
        .as_ref()
        .and_then(|handle| hub.content().resolve(&file.id, handle))
        .map(<[u8]>::to_vec)
        .ok_or_else(|| HubError::ContentUnavailable(file.name.clone()))?;

    activity::record(
        hub,
        ActivityAction::FileDownload,
        &workspace.title,
        format!("Downloaded {}", file.name),
    )?;
    Ok((file, bytes))
}

/// Totals shown beside the file list.
pub fn workspace_stats(hub: &WorkHub, workspace_id: &str) -> HubResult<WorkspaceStats> {
    let (user, _) = open(hub, workspace_id)?;
    let files = hub.storage.files.list(workspace_id)?;
    let access = if user.role.can_edit() {
        AccessLevel::Editor
    } else {
        AccessLevel::Viewer
    };
    Ok(WorkspaceStats::from_files(&files, access))
}
