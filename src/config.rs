//! Configuration management for the application.
//!
//! This module handles loading and validating application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{APP_NAME, DEFAULT_OUTPUT_FILE};

/// Karabiner profile settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Name of the generated profile
    pub name: String,
    /// Whether Karabiner shows its icon in the menu bar
    #[serde(default)]
    pub show_in_menu_bar: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            show_in_menu_bar: false,
        }
    }
}

/// Output location settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Where to write the generated file (defaults to ./karabiner.json)
    pub path: Option<PathBuf>,
}

/// Launcher customization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LauncherConfig {
    /// Path to a TOML file of sub-layer overrides merged over the built-in table
    pub overrides: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Hypergen/config.toml`
/// - macOS: `~/Library/Application Support/Hypergen/config.toml`
/// - Windows: `%APPDATA%\Hypergen\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Generated profile settings
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Output location settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Launcher customization settings
    #[serde(default)]
    pub launcher: LauncherConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

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
        if !Self::exists() {
            return Ok(Self::new());
        }

        let config_path = Self::config_file_path()?;
        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;

        Ok(config)
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - profile name is non-empty
    /// - overrides file exists if set
    pub fn validate(&self) -> Result<()> {
        if self.profile.name.trim().is_empty() {
            anyhow::bail!("Profile name must not be empty");
        }

        if let Some(overrides) = &self.launcher.overrides {
            if !overrides.exists() {
                anyhow::bail!("Overrides file does not exist: {}", overrides.display());
            }
        }

        Ok(())
    }

    /// Resolves the output path, falling back to the default file name
    /// in the current directory.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
    }
}
