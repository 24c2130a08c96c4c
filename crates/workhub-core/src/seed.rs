//! First-boot demo data.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::error::HubResult;
use crate::models::{
    ActivityAction, ActivityLogEntry, Role, User, WorkspaceColor, WorkspaceConfig, WorkspaceIcon,
};
use crate::storage::Storage;

pub fn demo_workspaces() -> Vec<WorkspaceConfig> {
    vec![
        WorkspaceConfig::new(
            "dev",
            "Development",
            "Source code, documentation, and development assets",
            WorkspaceIcon::Code,
            WorkspaceColor::Blue,
        ),
        WorkspaceConfig::new(
            "qa",
            "Quality Assurance",
            "Test cases, bug reports, and quality documentation",
            WorkspaceIcon::Bug,
            WorkspaceColor::Green,
        ),
        WorkspaceConfig::new(
            "review",
            "Review & Approval",
            "Documents for review, approvals, and sign-offs",
            WorkspaceIcon::Eye,
            WorkspaceColor::Purple,
        ),
        WorkspaceConfig::new(
            "admin",
            "Administration",
            "System settings, user management, and configurations",
            WorkspaceIcon::Settings,
            WorkspaceColor::Red,
        ),
        WorkspaceConfig::new(
            "data",
            "Data Management",
            "Database files, data analysis, and reports",
            WorkspaceIcon::Database,
            WorkspaceColor::Indigo,
        ),
        WorkspaceConfig::new(
            "docs",
            "Documentation",
            "User manuals, technical docs, and project specifications",
            WorkspaceIcon::FileText,
            WorkspaceColor::Orange,
        ),
        WorkspaceConfig::new(
            "planning",
            "Project Planning",
            "Project plans, timelines, and resource allocation",
            WorkspaceIcon::Clipboard,
            WorkspaceColor::Teal,
        ),
    ]
}

pub fn demo_users() -> Vec<User> {
    vec![
        User::new("1", "admin", Role::Admin)
            .with_workspaces(["dev", "qa", "review", "admin", "data", "docs", "planning"]),
        User::new("2", "dev-lead", Role::Editor).with_workspaces(["dev", "docs", "planning"]),
        User::new("3", "qa-manager", Role::Editor).with_workspaces(["qa", "docs"]),
        User::new("4", "reviewer", Role::Editor).with_workspaces(["review", "docs"]),
        User::new("5", "data-analyst", Role::Editor).with_workspaces(["data", "docs"]),
        User::new("6", "project-manager", Role::Editor)
            .with_workspaces(["planning", "docs", "admin"]),
        User::new("7", "viewer", Role::Viewer).with_workspaces(["dev", "qa", "review", "docs"]),
    ]
}

/// Sample history stamped relative to `now`.
pub fn demo_activity(now: DateTime<Utc>) -> Vec<ActivityLogEntry> {
    let entry = |id: &str, username: &str, action, workspace: &str, ago: Duration, details: &str| {
        ActivityLogEntry {
            id: id.to_string(),
            username: username.to_string(),
            action,
            workspace: workspace.to_string(),
            timestamp: now - ago,
            details: details.to_string(),
        }
    };

    // Oldest first, matching append order.
    vec![
        entry(
            "5",
            "project-manager",
            ActivityAction::FileUpload,
            "Project Planning",
            Duration::hours(8),
            "Uploaded project-timeline.xlsx",
        ),
        entry(
            "4",
            "reviewer",
            ActivityAction::FileDownload,
            "Review & Approval",
            Duration::hours(6),
            "Downloaded review-doc.pdf",
        ),
        entry(
            "3",
            "data-analyst",
            ActivityAction::Login,
            "Data Management",
            Duration::hours(4),
            "User logged in",
        ),
        entry(
            "2",
            "qa-manager",
            ActivityAction::FileDelete,
            "Quality Assurance",
            Duration::hours(2),
            "Deleted old-test.pdf",
        ),
        entry(
            "1",
            "dev-lead",
            ActivityAction::FileUpload,
            "Development",
            Duration::minutes(30),
            "Uploaded component.tsx",
        ),
    ]
}

/// Write the demo registry, roster and activity for slots never written.
pub fn ensure_seeded(storage: &Storage) -> HubResult<()> {
    if storage.registry.load()?.is_none() {
        let workspaces = demo_workspaces();
        storage.registry.save(&workspaces)?;
        info!(count = workspaces.len(), "Seeded workspace registry");
    }

    if storage.users.load()?.is_none() {
        let users = demo_users();
        storage.users.save(&users)?;
        info!(count = users.len(), "Seeded user directory");
    }

    if storage.activity.load()?.is_none() {
        storage.activity.save(&demo_activity(Utc::now()))?;
        info!("Seeded activity log");
    }

    Ok(())
}
