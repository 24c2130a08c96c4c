//! CLI configuration file support
//!
//! Loads configuration from ~/.config/workhub/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use workhub_core::HubConfig;

use crate::output::OutputFormat;

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default settings
    #[serde(default)]
    pub default: DefaultConfig,
    /// Hub limits passed to the core
    #[serde(default)]
    pub hub: HubConfig,
}

/// Default configuration values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultConfig {
    /// Default database path
    pub db_path: Option<String>,
    /// Default output format
    pub format: Option<OutputFormat>,
}

impl CliConfig {
    /// Load configuration from default path
    pub fn load() -> Self {
        Self::load_from_path(Self::default_path())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|err| {
                eprintln!("Ignoring invalid config {}: {}", path.display(), err);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("workhub").join("config.toml"))
    }

    /// Command-line flag first, then the config file, then text.
    pub fn output_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.default.format).unwrap_or_default()
    }
}
