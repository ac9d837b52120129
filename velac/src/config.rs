//! Configuration module for the `velac` CLI.
//!
//! Loads an optional `velac.toml`, searching the current directory, then
//! `$HOME/.config/velac`, then the platform config directory, falling back
//! to built-in defaults. CLI flags always take precedence over whatever
//! this loads.

use dirs::{config_dir, home_dir};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, VelacError};

pub const CONFIG_FILE_NAME: &str = "velac.toml";

/// The output a `check`/`ast` run produces when there were no errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    #[default]
    DiagnosticsOnly,
    Ast,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub verbose: bool,

    /// Reject any non-ASCII byte in the source file before lexing.
    #[serde(default)]
    pub ascii_only: bool,

    /// Stop at the first diagnostic instead of collecting every error in
    /// the file.
    #[serde(default)]
    pub stop_at_first_error: bool,

    #[serde(default)]
    pub output_mode: OutputMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            ascii_only: false,
            stop_at_first_error: false,
            output_mode: OutputMode::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default search order, or returns the
    /// built-in default if no `velac.toml` is found anywhere.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(VelacError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| VelacError::Config(format!("failed to parse configuration: {}", e)))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| VelacError::Config(format!("failed to serialize configuration: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("velac").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("velac").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}
