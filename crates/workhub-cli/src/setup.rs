//! CLI setup module
//!
//! Resolves the database location and opens the hub for one command.

use anyhow::Result;
use std::path::{Path, PathBuf};
use workhub_core::{WorkHub, paths};

use crate::config::CliConfig;

/// Flag or env first, then the config file, then ~/.workhub/workhub.db.
pub fn resolve_db_path(flag: Option<String>, config: &CliConfig) -> Result<String> {
    match flag.or_else(|| config.default.db_path.clone()) {
        Some(path) => Ok(path),
        None => paths::ensure_database_path_string(),
    }
}

/// Log files live beside the database.
pub fn log_dir(db_path: &str) -> Result<PathBuf> {
    match Path::new(db_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.join("logs")),
        _ => paths::logs_dir(),
    }
}

pub fn prepare_hub(db_path: &str, config: &CliConfig) -> Result<WorkHub> {
    Ok(WorkHub::open(db_path, config.hub.clone())?)
}
