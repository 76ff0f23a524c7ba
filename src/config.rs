//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application
//! configuration in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    ALPHABET_LEN, DEFAULT_API_KEY_ENV, DEFAULT_COLUMNS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RESHUFFLE_DELAY,
};

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

/// Board grid and timing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Number of grid columns.
    pub columns: u16,
    /// Delay between a completed key press and the reshuffle, in milliseconds.
    pub reshuffle_delay_ms: u64,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            reshuffle_delay_ms: DEFAULT_RESHUFFLE_DELAY.as_millis() as u64,
        }
    }
}

impl KeyboardConfig {
    /// The reshuffle delay as a [`Duration`].
    #[must_use]
    pub const fn reshuffle_delay(&self) -> Duration {
        Duration::from_millis(self.reshuffle_delay_ms)
    }
}

/// Remote translation service configuration.
///
/// Transport, authentication, and model selection are external to the core;
/// they all live here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Base URL of the OpenAI-compatible API.
    pub api_base: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Environment variable read for the API key.
    pub api_key_env: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Sampling temperature for the remote model.
    pub temperature: f32,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4.1-nano".to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            temperature: 0.8,
        }
    }
}

/// UI preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UiConfig {
    /// Theme mode preference
    pub theme_mode: ThemeMode,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Board grid and timing settings
    pub keyboard: KeyboardConfig,
    /// Remote translation service settings
    pub translator: TranslatorConfig,
    /// UI settings
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory.
    ///
    /// - Linux: `~/.config/Seance/`
    /// - macOS: `~/Library/Application Support/Seance/`
    /// - Windows: `%APPDATA%\Seance\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("Seance");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default location.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
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

    /// Saves configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        // Serialize to TOML
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        // Write to temp file
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - column count is between 1 and the alphabet size
    /// - request timeout is non-zero
    /// - temperature is within the range the API accepts
    pub fn validate(&self) -> Result<()> {
        let columns = self.keyboard.columns;
        if columns == 0 || usize::from(columns) > ALPHABET_LEN {
            anyhow::bail!(
                "keyboard.columns must be between 1 and {ALPHABET_LEN}, got {columns}"
            );
        }

        if self.translator.timeout_secs == 0 {
            anyhow::bail!("translator.timeout_secs must be greater than 0");
        }

        if !(0.0..=2.0).contains(&self.translator.temperature) {
            anyhow::bail!(
                "translator.temperature must be between 0.0 and 2.0, got {}",
                self.translator.temperature
            );
        }

        Ok(())
    }
}
