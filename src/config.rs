//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::CONFIG_DIR_NAME;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// UI preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme mode (Auto, Dark or Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Show the live clock in the title bar
    #[serde(default = "default_show_clock")]
    pub show_clock: bool,
}

fn default_show_clock() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            show_clock: default_show_clock(),
        }
    }
}

/// Where persisted session state lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// State file path. Defaults to `state.json` in the config directory.
    #[serde(default)]
    pub state_file: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Timelyo/config.toml`
/// - macOS: `~/Library/Application Support/Timelyo/config.toml`
/// - Windows: `%APPDATA%\Timelyo\config.toml`
///
/// # Validation
///
/// - `state_file`, if set, must not be an existing directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
    /// Persisted state location
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/Timelyo/`
    /// - macOS: `~/Library/Application Support/Timelyo/`
    /// - Windows: `%APPDATA%\Timelyo\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path using temp file + rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(state_file) = &self.storage.state_file {
            if state_file.as_os_str().is_empty() {
                anyhow::bail!("State file path is empty");
            }
            if state_file.is_dir() {
                anyhow::bail!(
                    "State file path is a directory: {}",
                    state_file.display()
                );
            }
        }

        Ok(())
    }

    /// Resolves the state file: the configured path or `state.json` in the
    /// config directory.
    pub fn state_file_path(&self) -> Result<PathBuf> {
        match &self.storage.state_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("state.json")),
        }
    }

    /// Default TUI log file in the config directory.
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("timelyo.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.ui.theme_mode, ThemeMode::Auto);
        assert!(config.ui.show_clock);
        assert_eq!(config.storage.state_file, None);
    }

    #[test]
    fn test_config_validate() {
        let config = Config::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_rejects_directory_state_file() {
        let temp_dir = TempDir::new().unwrap();

        let mut config = Config::new();
        config.storage.state_file = Some(temp_dir.path().to_path_buf());
        assert!(config.validate().is_err());

        config.storage.state_file = Some(temp_dir.path().join("state.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.ui.theme_mode = ThemeMode::Light;
        config.ui.show_clock = false;
        config.storage.state_file = Some(temp_dir.path().join("state.json"));

        config.save_to(&config_file).unwrap();
        assert!(!config_file.with_extension("toml.tmp").exists());

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("missing.toml")).unwrap();
        assert_eq!(loaded, Config::new());
    }

    #[test]
    fn test_config_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[ui]\ntheme_mode = \"Dark\"\n").unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.ui.theme_mode, ThemeMode::Dark);
        assert!(loaded.ui.show_clock);
        assert_eq!(loaded.storage, StorageConfig::default());
    }

    #[test]
    fn test_config_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[ui\ntheme_mode = ").unwrap();

        assert!(Config::load_from(&config_file).is_err());
    }

    #[test]
    fn test_state_file_path_prefers_configured() {
        let mut config = Config::new();
        config.storage.state_file = Some(PathBuf::from("/tmp/timelyo-state.json"));
        assert_eq!(
            config.state_file_path().unwrap(),
            PathBuf::from("/tmp/timelyo-state.json")
        );
    }
}
