use anyhow::Result;
use chrono::Utc;
use colored::{ColoredString, Colorize};
use comfy_table::Cell;
use workhub_core::services;
use workhub_core::{ActivityLogEntry, AdminOverview, PresenceStatus, WorkHub, format_relative};

use crate::cli::AdminCommands;
use crate::output::table::{new_table, print_table};
use crate::output::{OutputFormat, json::print_json};

pub fn run(hub: &WorkHub, command: AdminCommands, format: OutputFormat) -> Result<()> {
    match command {
        AdminCommands::Users { search } => users(hub, search.as_deref().unwrap_or(""), format),
        AdminCommands::Activity { search, limit } => {
            activity(hub, search.as_deref().unwrap_or(""), limit, format)
        }
    }
}

fn users(hub: &WorkHub, search: &str, format: OutputFormat) -> Result<()> {
    let overview = services::admin_overview(hub, search)?;

    if format.is_json() {
        return print_json(&overview);
    }

    print_overview(&overview);
    Ok(())
}

fn activity(hub: &WorkHub, search: &str, limit: Option<usize>, format: OutputFormat) -> Result<()> {
    let mut entries = services::list_activity(hub, search)?;
    if let Some(limit) = limit {
        entries.truncate(limit);
    }

    if format.is_json() {
        return print_json(&entries);
    }

    print_activity(&entries)
}

pub fn print_overview(overview: &AdminOverview) {
    let summary = &overview.summary;
    println!("Total users:    {}", summary.total_users);
    println!("Active today:   {}", summary.active_today);
    println!("Recent actions: {}", summary.recent_actions);
    println!("Last hour:      {}", summary.last_hour);
    println!();

    let now = Utc::now();
    let mut table = new_table(vec!["ID", "Username", "Role", "Status", "Last activity", "Workspaces"]);
    for row in &overview.users {
        table.add_row(vec![
            Cell::new(&row.user.id),
            Cell::new(&row.user.username),
            Cell::new(row.user.role),
            Cell::new(status_label(row.status)),
            Cell::new(
                row.last_activity
                    .map(|ts| format_relative(ts, now))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(row.user.workspaces.join(", ")),
        ]);
    }
    println!("{table}");
}

pub fn print_activity(entries: &[ActivityLogEntry]) -> Result<()> {
    if entries.is_empty() {
        println!("No activity recorded");
        return Ok(());
    }

    let now = Utc::now();
    let mut table = new_table(vec!["When", "User", "Action", "Workspace", "Details"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(format_relative(entry.timestamp, now)),
            Cell::new(&entry.username),
            Cell::new(entry.action.label()),
            Cell::new(if entry.workspace.is_empty() { "-" } else { entry.workspace.as_str() }),
            Cell::new(&entry.details),
        ]);
    }
    print_table(table)
}

fn status_label(status: PresenceStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        PresenceStatus::Online => label.green(),
        PresenceStatus::Recent => label.yellow(),
        PresenceStatus::Offline => label.dimmed(),
        PresenceStatus::Inactive => label.red(),
    }
}
