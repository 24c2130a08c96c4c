use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;
use serde_json::json;
use std::collections::BTreeMap;
use workhub_core::services;
use workhub_core::view::AccessBadge;
use workhub_core::{
    NewWorkspace, WorkHub, WorkspaceColor, WorkspaceConfig, WorkspaceIcon, WorkspaceUpdate,
    format_file_size,
};

use crate::cli::{AddWorkspaceArgs, EditWorkspaceArgs, WorkspaceCommands};
use crate::commands::utils::{parse_role_change, preview_text};
use crate::output::table::{new_table, print_table};
use crate::output::{OutputFormat, json::print_json};

pub fn run(hub: &mut WorkHub, command: WorkspaceCommands, format: OutputFormat) -> Result<()> {
    match command {
        WorkspaceCommands::List { search } => list(hub, search.as_deref().unwrap_or(""), format),
        WorkspaceCommands::Show { id } => show(hub, &id, format),
        WorkspaceCommands::Add(args) => add(hub, args, format),
        WorkspaceCommands::Edit(args) => edit(hub, args, format),
        WorkspaceCommands::Delete { id } => delete(hub, &id, format),
        WorkspaceCommands::Access { id } => access(hub, &id, format),
    }
}

fn list(hub: &WorkHub, search: &str, format: OutputFormat) -> Result<()> {
    let user = services::require_user(hub)?;
    let workspaces = services::visible_workspaces(hub, search)?;

    if format.is_json() {
        return print_json(&workspaces);
    }

    if workspaces.is_empty() {
        println!("No workspaces found");
        return Ok(());
    }

    let badge = AccessBadge::for_user(&user);
    let mut table = new_table(vec!["ID", "Title", "Description", "Icon", "Access"]);
    for workspace in workspaces {
        table.add_row(vec![
            Cell::new(workspace.id),
            Cell::new(workspace.title),
            Cell::new(preview_text(&workspace.description, 48)),
            Cell::new(workspace.icon.name()),
            Cell::new(badge.label()),
        ]);
    }
    print_table(table)
}

fn show(hub: &WorkHub, id: &str, format: OutputFormat) -> Result<()> {
    let workspace = services::get_workspace(hub, id)?;
    let stats = services::workspace_stats(hub, id)?;

    if format.is_json() {
        return print_json(&json!({ "workspace": workspace, "stats": stats }));
    }

    print_workspace(&workspace);
    println!();
    println!("Files:        {}", stats.total_files);
    println!("Total size:   {}", format_file_size(stats.total_size));
    println!("Contributors: {}", stats.contributors);
    println!("Your access:  {}", stats.access);
    Ok(())
}

fn add(hub: &mut WorkHub, args: AddWorkspaceArgs, format: OutputFormat) -> Result<()> {
    let icon: WorkspaceIcon = args.icon.parse()?;
    let color: WorkspaceColor = args.color.parse()?;
    let workspace = services::add_workspace(
        hub,
        NewWorkspace {
            id: args.id,
            title: args.title,
            description: args.description,
            icon,
            color,
            granted_user_ids: args.grant,
        },
    )?;

    if format.is_json() {
        return print_json(&workspace);
    }

    println!("{} Created workspace {}", "✓".green(), workspace.id.bold());
    Ok(())
}

fn edit(hub: &mut WorkHub, args: EditWorkspaceArgs, format: OutputFormat) -> Result<()> {
    let role_changes = args
        .roles
        .iter()
        .map(|r| parse_role_change(r))
        .collect::<Result<BTreeMap<_, _>>>()?;
    let update = WorkspaceUpdate {
        title: args.title,
        description: args.description,
        granted_user_ids: args.grant,
        role_changes,
    };
    if update.is_empty() {
        anyhow::bail!("Nothing to change: pass --title, --description, --grant or --role");
    }

    let workspace = services::update_workspace(hub, &args.id, update)?;

    if format.is_json() {
        return print_json(&workspace);
    }

    println!("{} Updated workspace {}", "✓".green(), workspace.id.bold());
    Ok(())
}

fn delete(hub: &mut WorkHub, id: &str, format: OutputFormat) -> Result<()> {
    let workspace = services::delete_workspace(hub, id)?;

    if format.is_json() {
        return print_json(&json!({ "deleted": workspace.id }));
    }

    println!("{} Deleted workspace {}", "✓".green(), workspace.id.bold());
    Ok(())
}

fn access(hub: &WorkHub, id: &str, format: OutputFormat) -> Result<()> {
    let users = services::workspace_access(hub, id)?;

    if format.is_json() {
        return print_json(&users);
    }

    let mut table = new_table(vec!["ID", "Username", "Role"]);
    for user in users {
        table.add_row(vec![
            Cell::new(user.id),
            Cell::new(user.username),
            Cell::new(user.role),
        ]);
    }
    print_table(table)
}

pub fn print_workspace(workspace: &WorkspaceConfig) {
    println!("ID:           {}", workspace.id);
    println!("Title:        {}", workspace.title.bold());
    println!("Description:  {}", workspace.description);
    println!("Icon:         {}", workspace.icon.name());
    println!("Color:        {}", workspace.color);
}
