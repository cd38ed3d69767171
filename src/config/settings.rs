//! User settings and preferences
//!
//! Manages application settings stored in ~/.sqlpane/config.toml

use crate::config::ConnectionConfig;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Upper bound on a single connect or query before it is reported as failed
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    /// Narrowest a result column is allowed to get
    #[serde(default = "default_min_column_width")]
    pub min_column_width: u16,

    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where log files go. Defaults to the platform data directory.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_command_timeout_secs() -> u64 {
    30
}

fn default_min_column_width() -> u16 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            command_timeout_secs: default_command_timeout_secs(),
            min_column_width: default_min_column_width(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl Settings {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs.max(1))
    }

    /// Resolved log directory
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("sqlpane")
                .join("logs")
        })
    }

    fn validate(self) -> ConfigResult<Self> {
        if self.min_column_width == 0 {
            return Err(ConfigError::Invalid(
                "min_column_width must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Load settings from the default config file
pub fn load_settings() -> ConfigResult<Settings> {
    let path = ConnectionConfig::config_dir()?.join("config.toml");
    if !path.exists() {
        return Ok(Settings::default());
    }
    load_settings_from(&path)
}

/// Load settings from an explicit path. Unlike the default location, a
/// missing file here is an error.
pub fn load_settings_from(path: &Path) -> ConfigResult<Settings> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> ConfigResult<Settings> {
    let settings: Settings = toml::from_str(content)?;
    settings.validate()
}
