//! Workspace registry service.
//!
//! A mutation rewrites the registry and the roster together, then refreshes
//! the session snapshot when the acting admin was among the affected users.

use tracing::info;

use super::activity;
use super::auth::{require_admin, require_user, sync_session};
use crate::error::{HubError, HubResult};
use crate::models::{ActivityAction, NewWorkspace, User, WorkspaceConfig, WorkspaceUpdate};
use crate::view::View;
use crate::WorkHub;

/// Workspaces the signed-in user may open, in registry order, filtered by a
/// case-insensitive match on id, title or description.
pub fn visible_workspaces(hub: &WorkHub, search: &str) -> HubResult<Vec<WorkspaceConfig>> {
    let user = require_user(hub)?;
    Ok(hub
        .storage
        .registry
        .list()?
        .into_iter()
        .filter(|w| user.has_access(&w.id) && w.matches_search(search))
        .collect())
}

/// Every registered workspace. Admin only.
pub fn list_workspaces(hub: &WorkHub) -> HubResult<Vec<WorkspaceConfig>> {
    require_admin(hub)?;
    hub.storage.registry.list()
}

/// A workspace the signed-in user may open.
pub fn get_workspace(hub: &WorkHub, id: &str) -> HubResult<WorkspaceConfig> {
    let user = require_user(hub)?;
    accessible_workspace(hub, &user, id)
}

pub(crate) fn accessible_workspace(
    hub: &WorkHub,
    user: &User,
    id: &str,
) -> HubResult<WorkspaceConfig> {
    let workspace = hub
        .storage
        .registry
        .get(id)?
        .ok_or_else(|| HubError::WorkspaceNotFound(id.to_string()))?;
    if !user.has_access(id) {
        return Err(HubError::PermissionDenied(format!(
            "{} has no access to workspace {}",
            user.username, id
        )));
    }
    Ok(workspace)
}

/// Users whose access list holds `id`. Admin only.
pub fn workspace_access(hub: &WorkHub, id: &str) -> HubResult<Vec<User>> {
    require_admin(hub)?;
    ensure_exists(hub, id)?;
    Ok(hub
        .storage
        .users
        .list()?
        .into_iter()
        .filter(|u| u.has_access(id))
        .collect())
}

/// The full roster. Admin only.
pub fn list_users(hub: &WorkHub) -> HubResult<Vec<User>> {
    require_admin(hub)?;
    hub.storage.users.list()
}

pub fn add_workspace(hub: &mut WorkHub, new: NewWorkspace) -> HubResult<WorkspaceConfig> {
    require_admin(hub)?;
    new.validate()?;

    let granted = new.granted_user_ids.clone();
    let config = new.into_config();

    let mut registry = hub.storage.registry.list()?;
    if registry.iter().any(|w| w.id == config.id) {
        return Err(HubError::WorkspaceExists(config.id));
    }

    let mut users = hub.storage.users.list()?;
    ensure_users_exist(&users, &granted)?;
    for user in users.iter_mut().filter(|u| granted.contains(&u.id)) {
        user.grant(&config.id);
    }

    registry.push(config.clone());
    hub.storage.registry.save(&registry)?;
    hub.storage.users.save(&users)?;
    sync_session(hub, &users)?;

    activity::record(
        hub,
        ActivityAction::WorkspaceCreate,
        &config.title,
        format!("Created workspace {}", config.id),
    )?;
    info!(workspace = %config.id, granted = granted.len(), "Workspace created");
    Ok(config)
}

pub fn update_workspace(
    hub: &mut WorkHub,
    id: &str,
    update: WorkspaceUpdate,
) -> HubResult<WorkspaceConfig> {
    require_admin(hub)?;
    update.validate()?;

    let mut registry = hub.storage.registry.list()?;
    let index = registry
        .iter()
        .position(|w| w.id == id)
        .ok_or_else(|| HubError::WorkspaceNotFound(id.to_string()))?;

    let mut users = hub.storage.users.list()?;
    if let Some(granted) = &update.granted_user_ids {
        ensure_users_exist(&users, granted)?;
    }
    let role_targets: Vec<String> = update.role_changes.keys().cloned().collect();
    ensure_users_exist(&users, &role_targets)?;

    {
        let workspace = &mut registry[index];
        if let Some(title) = &update.title {
            workspace.title = title.trim().to_string();
        }
        if let Some(description) = &update.description {
            workspace.description = description.trim().to_string();
        }
    }

    for user in users.iter_mut() {
        if let Some(granted) = &update.granted_user_ids {
            if granted.contains(&user.id) {
                user.grant(id);
            } else {
                user.revoke(id);
            }
        }
        if let Some(role) = update.role_changes.get(&user.id) {
            user.role = *role;
        }
    }

    let updated = registry[index].clone();
    hub.storage.registry.save(&registry)?;
    hub.storage.users.save(&users)?;
    sync_session(hub, &users)?;

    activity::record(
        hub,
        ActivityAction::WorkspaceUpdate,
        &updated.title,
        format!("Updated workspace {}", updated.id),
    )?;
    info!(workspace = %updated.id, "Workspace updated");
    Ok(updated)
}

/// Remove a workspace, its grants and its files.
pub fn delete_workspace(hub: &mut WorkHub, id: &str) -> HubResult<WorkspaceConfig> {
    require_admin(hub)?;

    let mut registry = hub.storage.registry.list()?;
    let index = registry
        .iter()
        .position(|w| w.id == id)
        .ok_or_else(|| HubError::WorkspaceNotFound(id.to_string()))?;
    let removed = registry.remove(index);

    let mut users = hub.storage.users.list()?;
    let mut revoked = 0;
    for user in users.iter_mut() {
        if user.revoke(id) {
            revoked += 1;
        }
    }

    let files = hub.storage.files.list(id)?;

    // Roster first: a failure after it leaves a registered workspace nobody
    // holds, never a holder of a workspace that no longer exists.
    hub.storage.users.save(&users)?;
    hub.storage.registry.save(&registry)?;
    hub.storage.files.remove(id)?;
    for file in &files {
        hub.content_mut().revoke(&file.id);
    }
    sync_session(hub, &users)?;

    if matches!(hub.view(), View::WorkspaceDetail { workspace_id } if workspace_id == id) {
        hub.set_view(View::WorkspaceList);
    }

    activity::record(
        hub,
        ActivityAction::WorkspaceDelete,
        &removed.title,
        format!("Deleted workspace {} and {} file(s)", removed.id, files.len()),
    )?;
    info!(workspace = %removed.id, revoked, files = files.len(), "Workspace deleted");
    Ok(removed)
}

fn ensure_exists(hub: &WorkHub, id: &str) -> HubResult<()> {
    match hub.storage.registry.get(id)? {
        Some(_) => Ok(()),
        None => Err(HubError::WorkspaceNotFound(id.to_string())),
    }
}

fn ensure_users_exist(users: &[User], ids: &[String]) -> HubResult<()> {
    match ids.iter().find(|id| !users.iter().any(|u| &u.id == *id)) {
        Some(missing) => Err(HubError::UserNotFound(missing.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, WorkspaceColor, WorkspaceIcon};
    use crate::services::auth::login;
    use crate::storage::failing::FailingWrites;
    use crate::storage::{REGISTRY_KEY, Storage, USERS_KEY};
    use crate::HubConfig;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn hub_as(username: &str, password: &str) -> WorkHub {
        let mut hub = WorkHub::in_memory(HubConfig::default()).unwrap();
        login(&mut hub, username, password).unwrap();
        hub
    }

    fn frontend(granted: &[&str]) -> NewWorkspace {
        NewWorkspace {
            id: "Frontend Dev".to_string(),
            title: "Frontend Development".to_string(),
            description: "UI components and styling".to_string(),
            icon: WorkspaceIcon::Code,
            color: WorkspaceColor::Pink,
            granted_user_ids: granted.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_visible_workspaces_follow_access_list() {
        let hub = hub_as("qa-manager", "qa123");
        let ids: Vec<_> = visible_workspaces(&hub, "")
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec!["qa", "docs"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let hub = hub_as("admin", "admin123");
        let by_id = visible_workspaces(&hub, "qa").unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].title, "Quality Assurance");

        let by_title = visible_workspaces(&hub, "QUALITY").unwrap();
        assert_eq!(by_title[0].id, "qa");
        assert!(visible_workspaces(&hub, "nothing here").unwrap().is_empty());
    }

    #[test]
    fn test_add_workspace_grants_users() {
        let mut hub = hub_as("admin", "admin123");
        let created = add_workspace(&mut hub, frontend(&["1", "2"])).unwrap();

        assert_eq!(created.id, "frontend-dev");
        assert_eq!(created.color, "bg-pink-500");

        let holders: Vec<_> = workspace_access(&hub, "frontend-dev")
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(holders, vec!["admin", "dev-lead"]);

        // the acting admin was granted, so their own session sees it now
        assert!(hub.current_user().unwrap().has_access("frontend-dev"));
        assert!(
            visible_workspaces(&hub, "frontend")
                .unwrap()
                .iter()
                .any(|w| w.id == "frontend-dev")
        );
    }

    #[test]
    fn test_add_workspace_rejects_missing_fields_without_mutation() {
        let mut hub = hub_as("admin", "admin123");
        let mut incomplete = frontend(&["2"]);
        incomplete.description = String::new();

        assert!(matches!(
            add_workspace(&mut hub, incomplete),
            Err(HubError::Validation(_))
        ));
        assert_eq!(list_workspaces(&hub).unwrap().len(), 7);
        let users = list_users(&hub).unwrap();
        assert_eq!(users[1].workspaces, vec!["dev", "docs", "planning"]);
    }

    #[test]
    fn test_add_workspace_rejects_duplicates_and_unknown_users() {
        let mut hub = hub_as("admin", "admin123");
        let mut duplicate = frontend(&[]);
        duplicate.id = "QA".to_string();
        assert!(matches!(
            add_workspace(&mut hub, duplicate),
            Err(HubError::WorkspaceExists(id)) if id == "qa"
        ));
        assert!(matches!(
            add_workspace(&mut hub, frontend(&["99"])),
            Err(HubError::UserNotFound(id)) if id == "99"
        ));
    }

    #[test]
    fn test_non_admin_cannot_manage() {
        let mut hub = hub_as("dev-lead", "dev123");
        assert!(matches!(
            add_workspace(&mut hub, frontend(&[])),
            Err(HubError::PermissionDenied(_))
        ));
        assert!(matches!(
            delete_workspace(&mut hub, "dev"),
            Err(HubError::PermissionDenied(_))
        ));
    }

    #[test]
    fn test_update_replaces_access_set_and_roles() {
        let mut hub = hub_as("admin", "admin123");
        let mut role_changes = BTreeMap::new();
        role_changes.insert("7".to_string(), Role::Editor);

        let updated = update_workspace(
            &mut hub,
            "review",
            WorkspaceUpdate {
                title: Some("Reviews".to_string()),
                description: None,
                granted_user_ids: Some(vec!["1".to_string(), "3".to_string()]),
                role_changes,
            },
        )
        .unwrap();
        assert_eq!(updated.title, "Reviews");

        let users = list_users(&hub).unwrap();
        let by_name = |name: &str| users.iter().find(|u| u.username == name).unwrap();
        assert!(by_name("qa-manager").has_access("review"));
        assert!(!by_name("reviewer").has_access("review"));
        assert!(!by_name("viewer").has_access("review"));
        assert_eq!(by_name("viewer").role, Role::Editor);
    }

    #[test]
    fn test_update_revoking_self_refreshes_session() {
        let mut hub = hub_as("admin", "admin123");
        update_workspace(
            &mut hub,
            "data",
            WorkspaceUpdate {
                granted_user_ids: Some(vec!["5".to_string()]),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(!hub.current_user().unwrap().has_access("data"));
        assert!(!hub.storage.session.load().unwrap().unwrap().has_access("data"));
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let mut hub = hub_as("admin", "admin123");
        let result = update_workspace(
            &mut hub,
            "dev",
            WorkspaceUpdate {
                title: Some("   ".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(HubError::Validation(_))));
        assert_eq!(get_workspace(&hub, "dev").unwrap().title, "Development");
    }

    #[test]
    fn test_delete_cascades_to_access_lists() {
        let mut hub = hub_as("admin", "admin123");
        delete_workspace(&mut hub, "qa").unwrap();

        for user in list_users(&hub).unwrap() {
            assert!(!user.has_access("qa"), "{} still holds qa", user.username);
        }
        assert!(!hub.current_user().unwrap().has_access("qa"));
        assert!(matches!(
            get_workspace(&hub, "qa"),
            Err(HubError::WorkspaceNotFound(_))
        ));
        assert!(matches!(
            delete_workspace(&mut hub, "qa"),
            Err(HubError::WorkspaceNotFound(_))
        ));
    }

    fn admin_over(store: &Arc<FailingWrites>) -> WorkHub {
        let storage = Storage::with_store(store.clone());
        let mut hub = WorkHub::with_storage(storage, HubConfig::default()).unwrap();
        login(&mut hub, "admin", "admin123").unwrap();
        hub
    }

    fn holders(hub: &WorkHub, id: &str) -> Vec<String> {
        workspace_access(hub, id)
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect()
    }

    #[test]
    fn test_failed_roster_write_keeps_workspace_and_holders() {
        let store = Arc::new(FailingWrites::default());
        let mut hub = admin_over(&store);
        let before = holders(&hub, "qa");

        store.fail_writes_to(USERS_KEY);
        let err = delete_workspace(&mut hub, "qa").unwrap_err();
        assert!(matches!(err, HubError::Storage(_)), "{err}");

        assert!(get_workspace(&hub, "qa").is_ok());
        assert_eq!(holders(&hub, "qa"), before);
        assert_eq!(hub.view(), &View::WorkspaceList);
    }

    #[test]
    fn test_failed_registry_write_leaves_no_dangling_grants() {
        let store = Arc::new(FailingWrites::default());
        let mut hub = admin_over(&store);

        store.fail_writes_to(REGISTRY_KEY);
        assert!(delete_workspace(&mut hub, "qa").is_err());

        let registered: Vec<_> = list_workspaces(&hub)
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect();
        for user in list_users(&hub).unwrap() {
            for id in &user.workspaces {
                assert!(registered.contains(id), "{} holds missing {}", user.username, id);
            }
        }
    }
}
