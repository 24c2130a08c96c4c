//! Path utilities for WorkHub directory resolution.
//!
//! This is the canonical source for shared path functions. Re-exported by
//! workhub-core for convenience.

use anyhow::Result;
use std::path::PathBuf;

const WORKHUB_DIR: &str = ".workhub";
const DB_FILE: &str = "workhub.db";
const LOGS_DIR: &str = "logs";

/// Environment variable to override the WorkHub directory.
pub const WORKHUB_DIR_ENV: &str = "WORKHUB_DIR";

/// Resolve the WorkHub data directory.
/// Priority: WORKHUB_DIR env var > ~/.workhub/
pub fn resolve_workhub_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(WORKHUB_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|h| h.join(WORKHUB_DIR))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))
}

/// Ensure the WorkHub directory exists and return its path.
pub fn ensure_workhub_dir() -> Result<PathBuf> {
    let dir = resolve_workhub_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Ensure the directory exists and return the database path
/// (~/.workhub/workhub.db) as a string.
pub fn ensure_database_path_string() -> Result<String> {
    Ok(ensure_workhub_dir()?
        .join(DB_FILE)
        .to_string_lossy()
        .into_owned())
}

/// Get the logs directory: ~/.workhub/logs/
pub fn logs_dir() -> Result<PathBuf> {
    let dir = resolve_workhub_dir()?.join(LOGS_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
