mod cli;
mod commands;
mod completions;
mod config;
mod error;
mod output;
mod setup;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;
use workhub_core::WorkHub;

use crate::output::OutputFormat;

fn main() {
    if let Err(err) = run() {
        error::handle_error(err);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        completions::generate_completions(shell);
        return Ok(());
    }

    let config = config::CliConfig::load();
    let format = config.output_format(cli.format);
    let db_path = setup::resolve_db_path(cli.db_path, &config)?;

    // Logs always go to a file so command output stays clean.
    let log_dir = setup::log_dir(&db_path)?;
    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "workhub.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    tracing::debug!(db_path = %db_path, "Opening hub");
    let mut hub = setup::prepare_hub(&db_path, &config)?;

    match cli.command {
        None | Some(Commands::Shell) => commands::shell::run(&mut hub, format),
        Some(command) => dispatch(&mut hub, command, format),
    }
}

fn dispatch(hub: &mut WorkHub, command: Commands, format: OutputFormat) -> Result<()> {
    match command {
        Commands::Login { username, password } => {
            commands::auth::login(hub, &username, password, format)
        }
        Commands::Logout => commands::auth::logout(hub, format),
        Commands::Whoami => commands::auth::whoami(hub, format),
        Commands::Workspace { command } => commands::workspace::run(hub, command, format),
        Commands::File { command } => commands::file::run(hub, command, format),
        Commands::Admin { command } => commands::admin::run(hub, command, format),
        Commands::Shell => commands::shell::run(hub, format),
        Commands::Completions { shell } => {
            completions::generate_completions(shell);
            Ok(())
        }
    }
}
