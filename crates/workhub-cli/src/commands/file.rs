use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::Cell;
use serde_json::json;
use workhub_core::services;
use workhub_core::{WorkHub, format_file_size};

use crate::cli::FileCommands;
use crate::commands::utils::{format_timestamp, read_upload};
use crate::output::table::{new_table, print_table};
use crate::output::{OutputFormat, json::print_json};

pub fn run(hub: &mut WorkHub, command: FileCommands, format: OutputFormat) -> Result<()> {
    match command {
        FileCommands::List { workspace, search } => {
            list(hub, &workspace, search.as_deref().unwrap_or(""), format)
        }
        FileCommands::Upload { workspace, paths } => upload(hub, &workspace, &paths, format),
        FileCommands::Delete { workspace, file_id } => delete(hub, &workspace, &file_id, format),
        FileCommands::Download {
            workspace,
            file_id,
            output,
        } => download(hub, &workspace, &file_id, output, format),
    }
}

pub fn list(hub: &WorkHub, workspace: &str, search: &str, format: OutputFormat) -> Result<()> {
    let files = services::list_files(hub, workspace, search)?;

    if format.is_json() {
        return print_json(&files);
    }

    if files.is_empty() {
        println!("No files in {}", workspace);
        return Ok(());
    }

    let mut table = new_table(vec![
        "ID",
        "Name",
        "Size",
        "Kind",
        "Type",
        "Uploaded by",
        "Uploaded at",
    ]);
    for file in files {
        table.add_row(vec![
            Cell::new(&file.id),
            Cell::new(&file.name),
            Cell::new(format_file_size(file.size)),
            Cell::new(file.kind()),
            Cell::new(&file.mime_type),
            Cell::new(&file.uploaded_by),
            Cell::new(format_timestamp(file.uploaded_at)),
        ]);
    }
    print_table(table)
}

pub fn upload(hub: &mut WorkHub, workspace: &str, paths: &[String], format: OutputFormat) -> Result<()> {
    let uploads = paths
        .iter()
        .map(|p| read_upload(p))
        .collect::<Result<Vec<_>>>()?;
    let added = services::upload_files(hub, workspace, uploads)?;

    if format.is_json() {
        return print_json(&added);
    }

    for file in added {
        println!(
            "{} Uploaded {} ({}) as {}",
            "✓".green(),
            file.name.bold(),
            format_file_size(file.size),
            file.id
        );
    }
    Ok(())
}

pub fn delete(hub: &mut WorkHub, workspace: &str, file_id: &str, format: OutputFormat) -> Result<()> {
    let removed = services::delete_file(hub, workspace, file_id)?;

    if format.is_json() {
        return print_json(&json!({ "deleted": removed.id, "name": removed.name }));
    }

    println!("{} Deleted {}", "✓".green(), removed.name.bold());
    Ok(())
}

pub fn download(
    hub: &WorkHub,
    workspace: &str,
    file_id: &str,
    output: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let (file, bytes) = services::download_file(hub, workspace, file_id)?;
    let target = output.unwrap_or_else(|| file.name.clone());
    std::fs::write(&target, &bytes).with_context(|| format!("Failed to write {}", target))?;

    if format.is_json() {
        return print_json(&json!({ "file": file, "path": target, "bytes": bytes.len() }));
    }

    println!(
        "{} Saved {} to {}",
        "✓".green(),
        file.name.bold(),
        target
    );
    Ok(())
}
