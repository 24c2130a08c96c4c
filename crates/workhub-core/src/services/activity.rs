//! Activity log service and the admin panel overview.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use super::auth::require_admin;
use crate::error::HubResult;
use crate::models::{
    ActivityAction, ActivityLogEntry, AdminOverview, AdminSummary, PresenceStatus,
    UserActivityRow,
};
use crate::WorkHub;

/// Append an entry for the signed-in user.
pub(crate) fn record(
    hub: &WorkHub,
    action: ActivityAction,
    workspace: &str,
    details: impl Into<String>,
) -> HubResult<()> {
    let Some(user) = hub.current_user() else {
        return Ok(());
    };
    let entry = ActivityLogEntry {
        id: Uuid::new_v4().to_string(),
        username: user.username.clone(),
        action,
        workspace: workspace.to_string(),
        timestamp: Utc::now(),
        details: details.into(),
    };
    hub.storage
        .activity
        .append(entry, hub.config().activity_log_limit)
}

/// Activity entries matching `search`, newest first. Admin only.
pub fn list_activity(hub: &WorkHub, search: &str) -> HubResult<Vec<ActivityLogEntry>> {
    require_admin(hub)?;
    let mut entries: Vec<_> = hub
        .storage
        .activity
        .list()?
        .into_iter()
        .filter(|e| e.matches_search(search))
        .collect();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(entries)
}

pub fn admin_overview(hub: &WorkHub, search: &str) -> HubResult<AdminOverview> {
    admin_overview_at(hub, search, Utc::now())
}

/// Admin panel data as seen at `now`.
///
/// `search` filters the user rows by username or role and the activity rows
/// by username, action or workspace. Summary counts ignore the filter.
pub fn admin_overview_at(
    hub: &WorkHub,
    search: &str,
    now: DateTime<Utc>,
) -> HubResult<AdminOverview> {
    require_admin(hub)?;

    let users = hub.storage.users.list()?;
    let entries = hub.storage.activity.list()?;

    let mut last_seen: HashMap<&str, DateTime<Utc>> = HashMap::new();
    for entry in &entries {
        last_seen
            .entry(entry.username.as_str())
            .and_modify(|ts| *ts = (*ts).max(entry.timestamp))
            .or_insert(entry.timestamp);
    }

    let active_window = Duration::hours(hub.config().active_window_hours);
    let summary = AdminSummary {
        total_users: users.len(),
        active_today: users
            .iter()
            .filter(|u| {
                last_seen
                    .get(u.username.as_str())
                    .is_some_and(|ts| now - *ts < active_window)
            })
            .count(),
        recent_actions: entries.len(),
        last_hour: entries
            .iter()
            .filter(|e| now - e.timestamp < Duration::hours(1))
            .count(),
    };

    let term = search.trim().to_lowercase();
    let rows = users
        .iter()
        .filter(|u| {
            term.is_empty()
                || u.username.to_lowercase().contains(&term)
                || u.role.as_str().contains(&term)
        })
        .map(|u| {
            let last_activity = last_seen.get(u.username.as_str()).copied();
            UserActivityRow {
                user: u.clone(),
                status: PresenceStatus::from_last_activity(last_activity, now),
                last_activity,
            }
        })
        .collect();

    let mut activity: Vec<_> = entries
        .iter()
        .filter(|e| e.matches_search(search))
        .cloned()
        .collect();
    activity.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    Ok(AdminOverview {
        users: rows,
        activity,
        summary,
    })
}
