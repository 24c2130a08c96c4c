//! Line-driven shell over the view controller.
//!
//! Content uploaded here stays downloadable until the shell exits.

use anyhow::{Result, bail};
use colored::Colorize;
use comfy_table::Cell;
use std::io::{self, BufRead, Write};
use workhub_core::view::{self, Screen, View};
use workhub_core::{WorkHub, format_file_size};

use crate::commands::admin::{print_activity, print_overview};
use crate::commands::{auth, file};
use crate::output::table::{new_table, print_table};
use crate::output::{OutputFormat, json::print_json};

const HELP: &str = "\
Commands:
  login <username>         Sign in (password is prompted)
  logout                   Sign out
  ls                       Render the current screen
  search [term]            Set or clear the search box and render
  open <workspace>         Open a workspace from the list
  admin                    Open the admin panel
  back                     Return to the workspace list
  upload <path>...         Upload files into the open workspace
  rm <file-id>             Delete a file from the open workspace
  get <file-id> [output]   Download a file from the open workspace
  help                     Show this help
  quit                     Leave the shell";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Login(String),
    Logout,
    Render,
    Search(String),
    Open(String),
    Admin,
    Back,
    Upload(Vec<String>),
    Remove(String),
    Download(String, Option<String>),
    Help,
    Quit,
}

fn parse(line: &str) -> Result<Option<ShellCommand>> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<String> = words.map(str::to_string).collect();

    let command = match (head, rest.as_slice()) {
        ("login", [username]) => ShellCommand::Login(username.clone()),
        ("logout", []) => ShellCommand::Logout,
        ("ls", []) => ShellCommand::Render,
        ("search", terms) => ShellCommand::Search(terms.join(" ")),
        ("open", [id]) => ShellCommand::Open(id.clone()),
        ("admin", []) => ShellCommand::Admin,
        ("back", []) => ShellCommand::Back,
        ("upload", paths) if !paths.is_empty() => ShellCommand::Upload(paths.to_vec()),
        ("rm", [id]) => ShellCommand::Remove(id.clone()),
        ("get", [id]) => ShellCommand::Download(id.clone(), None),
        ("get", [id, output]) => ShellCommand::Download(id.clone(), Some(output.clone())),
        ("help" | "?", []) => ShellCommand::Help,
        ("quit" | "exit", []) => ShellCommand::Quit,
        _ => bail!("Unrecognized command '{}'. Type `help` for usage.", line.trim()),
    };
    Ok(Some(command))
}

pub fn run(hub: &mut WorkHub, format: OutputFormat) -> Result<()> {
    let stdin = io::stdin();
    let mut search = String::new();

    println!("WorkHub shell. Type `help` for commands.");
    render(hub, &search, format)?;

    loop {
        print!("{} ", prompt(hub)?.cyan());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{} {}", "Error:".red().bold(), err);
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }

        if let Err(err) = execute(hub, command, &mut search, format) {
            eprintln!("{} {}", "Error:".red().bold(), err);
        }
    }

    Ok(())
}

fn prompt(hub: &mut WorkHub) -> Result<String> {
    let view = view::current_view(hub)?;
    let user = hub.current_user().map(|u| u.username.as_str()).unwrap_or("guest");
    let location = match view {
        View::LoggedOut => "login".to_string(),
        View::WorkspaceList => "workspaces".to_string(),
        View::WorkspaceDetail { workspace_id } => workspace_id,
        View::AdminPanel => "admin".to_string(),
    };
    Ok(format!("{}@{}>", user, location))
}

fn execute(
    hub: &mut WorkHub,
    command: ShellCommand,
    search: &mut String,
    format: OutputFormat,
) -> Result<()> {
    match command {
        ShellCommand::Login(username) => {
            auth::login(hub, &username, None, format)?;
            search.clear();
        }
        ShellCommand::Logout => {
            auth::logout(hub, format)?;
            search.clear();
        }
        ShellCommand::Render => {}
        ShellCommand::Search(term) => *search = term,
        ShellCommand::Open(id) => {
            view::open_workspace(hub, &id)?;
            search.clear();
        }
        ShellCommand::Admin => {
            view::open_admin_panel(hub)?;
            search.clear();
        }
        ShellCommand::Back => {
            view::back(hub)?;
            search.clear();
        }
        ShellCommand::Upload(paths) => {
            let workspace = open_workspace_id(hub)?;
            file::upload(hub, &workspace, &paths, format)?;
        }
        ShellCommand::Remove(file_id) => {
            let workspace = open_workspace_id(hub)?;
            file::delete(hub, &workspace, &file_id, format)?;
        }
        ShellCommand::Download(file_id, output) => {
            let workspace = open_workspace_id(hub)?;
            file::download(hub, &workspace, &file_id, output, format)?;
            return Ok(());
        }
        ShellCommand::Help => {
            println!("{HELP}");
            return Ok(());
        }
        ShellCommand::Quit => return Ok(()),
    }
    render(hub, search, format)
}

fn open_workspace_id(hub: &mut WorkHub) -> Result<String> {
    match view::current_view(hub)? {
        View::WorkspaceDetail { workspace_id } => Ok(workspace_id),
        _ => bail!("Open a workspace first"),
    }
}

fn render(hub: &mut WorkHub, search: &str, format: OutputFormat) -> Result<()> {
    let screen = view::screen(hub, search)?;

    if format.is_json() {
        return print_json(&screen);
    }

    match screen {
        Screen::Login => {
            println!("Not signed in. Use `login <username>`.");
            println!("Known users: {}", hub.credentials().usernames().join(", "));
            Ok(())
        }
        Screen::WorkspaceGrid {
            user,
            cards,
            can_manage,
        } => {
            println!(
                "Workspaces for {} ({}){}",
                user.username.bold(),
                user.role,
                if can_manage { ", `admin` to manage" } else { "" }
            );
            if cards.is_empty() {
                println!("No workspaces found");
                return Ok(());
            }
            let mut table = new_table(vec!["ID", "Title", "Category", "Description", "Access"]);
            for card in cards {
                table.add_row(vec![
                    Cell::new(card.workspace.id),
                    Cell::new(card.workspace.title),
                    Cell::new(card.workspace.icon.label()),
                    Cell::new(card.workspace.description),
                    Cell::new(card.badge.label()),
                ]);
            }
            print_table(table)
        }
        Screen::FileManager {
            workspace,
            files,
            controls,
            stats,
            ..
        } => {
            println!("{} ({})", workspace.title.bold(), workspace.id);
            println!(
                "{} files, {}, {} contributors, access: {}",
                stats.total_files,
                format_file_size(stats.total_size),
                stats.contributors,
                stats.access
            );
            let mut actions = Vec::new();
            if controls.upload {
                actions.push("upload");
            }
            if controls.delete {
                actions.push("rm");
            }
            if controls.download {
                actions.push("get");
            }
            println!("Actions: {}", actions.join(", "));

            if files.is_empty() {
                println!("No files");
                return Ok(());
            }
            let mut table = new_table(vec!["ID", "Name", "Kind", "Size", "Uploaded by", "Content"]);
            for f in files {
                table.add_row(vec![
                    Cell::new(&f.id),
                    Cell::new(&f.name),
                    Cell::new(f.kind()),
                    Cell::new(format_file_size(f.size)),
                    Cell::new(&f.uploaded_by),
                    Cell::new(if f.content.is_some() { "available" } else { "expired" }),
                ]);
            }
            print_table(table)
        }
        Screen::AdminPanel { overview, .. } => {
            print_overview(&overview);
            print_activity(&overview.activity)
        }
    }
}
