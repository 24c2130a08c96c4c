use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Login,
    Logout,
    FileUpload,
    FileDelete,
    FileDownload,
    WorkspaceCreate,
    WorkspaceUpdate,
    WorkspaceDelete,
}

impl ActivityAction {
    pub fn label(self) -> &'static str {
        match self {
            ActivityAction::Login => "Login",
            ActivityAction::Logout => "Logout",
            ActivityAction::FileUpload => "File Upload",
            ActivityAction::FileDelete => "File Delete",
            ActivityAction::FileDownload => "File Download",
            ActivityAction::WorkspaceCreate => "Workspace Create",
            ActivityAction::WorkspaceUpdate => "Workspace Update",
            ActivityAction::WorkspaceDelete => "Workspace Delete",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityLogEntry {
    pub id: String,
    pub username: String,
    pub action: ActivityAction,
    /// Workspace title at the time of the action, empty for session events.
    #[serde(default)]
    pub workspace: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub details: String,
}

impl ActivityLogEntry {
    /// Matches username, action label or workspace, case-insensitively.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.username.to_lowercase().contains(&term)
            || self.action.label().to_lowercase().contains(&term)
            || self.workspace.to_lowercase().contains(&term)
    }
}

/// Presence badge derived from a user's most recent activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    Online,
    Recent,
    Offline,
    Inactive,
}

impl PresenceStatus {
    pub fn from_last_activity(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(last) = last else {
            return PresenceStatus::Inactive;
        };
        let elapsed = now - last;
        if elapsed < Duration::hours(1) {
            PresenceStatus::Online
        } else if elapsed < Duration::hours(24) {
            PresenceStatus::Recent
        } else {
            PresenceStatus::Offline
        }
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PresenceStatus::Online => "Online",
            PresenceStatus::Recent => "Recent",
            PresenceStatus::Offline => "Offline",
            PresenceStatus::Inactive => "Inactive",
        };
        f.write_str(label)
    }
}

/// One row of the admin user table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserActivityRow {
    pub user: User,
    pub status: PresenceStatus,
    pub last_activity: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminSummary {
    pub total_users: usize,
    pub active_today: usize,
    pub recent_actions: usize,
    pub last_hour: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminOverview {
    pub users: Vec<UserActivityRow>,
    pub activity: Vec<ActivityLogEntry>,
    pub summary: AdminSummary,
}

/// Render a timestamp as "N minutes ago", "N hours ago" or a calendar date.
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes().max(0);
    if minutes < 60 {
        format!("{} minutes ago", minutes)
    } else if minutes < 1440 {
        format!("{} hours ago", minutes / 60)
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_presence_status_windows() {
        let now = Utc::now();
        assert_eq!(
            PresenceStatus::from_last_activity(Some(now - Duration::minutes(30)), now),
            PresenceStatus::Online
        );
        assert_eq!(
            PresenceStatus::from_last_activity(Some(now - Duration::hours(6)), now),
            PresenceStatus::Recent
        );
        assert_eq!(
            PresenceStatus::from_last_activity(Some(now - Duration::days(3)), now),
            PresenceStatus::Offline
        );
        assert_eq!(
            PresenceStatus::from_last_activity(None, now),
            PresenceStatus::Inactive
        );
    }

    #[test]
    fn test_format_relative() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        assert_eq!(format_relative(now - Duration::minutes(30), now), "30 minutes ago");
        assert_eq!(format_relative(now - Duration::hours(8), now), "8 hours ago");
        assert_eq!(format_relative(now - Duration::days(2), now), "2024-05-08");
    }

    #[test]
    fn test_entry_search_covers_action_label() {
        let entry = ActivityLogEntry {
            id: "1".to_string(),
            username: "reviewer".to_string(),
            action: ActivityAction::FileDownload,
            workspace: "Review & Approval".to_string(),
            timestamp: Utc::now(),
            details: "Downloaded review-doc.pdf".to_string(),
        };
        assert!(entry.matches_search("download"));
        assert!(entry.matches_search("REVIEWER"));
        assert!(entry.matches_search("approval"));
        assert!(!entry.matches_search("upload"));
    }
}
