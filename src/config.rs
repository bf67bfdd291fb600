//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::sources::{
    SourceLocation, SourceLocator, CONTOUR_SOURCE_ID, UNRESOLVED_KEY_PLACEHOLDER,
};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "POSTERSTYLE_CONFIG_DIR";

/// Palette used when neither the command line nor the config names one.
pub const DEFAULT_PALETTE: &str = "paper";

/// Environment variable read for the contour tile API key by default.
pub const DEFAULT_CONTOUR_KEY_ENV: &str = "MAPTILER_KEY";

/// Contour TileJSON URL used when none is configured.
pub const DEFAULT_CONTOUR_URL: &str =
    "https://api.maptiler.com/tiles/contours-v2/tiles.json?key={key}";

/// Derivation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriveConfig {
    /// Built-in palette used when `--palette` is omitted
    pub default_palette: String,
    /// Pretty-print derived styles
    pub pretty: bool,
}

impl Default for DeriveConfig {
    fn default() -> Self {
        Self {
            default_palette: DEFAULT_PALETTE.to_string(),
            pretty: false,
        }
    }
}

/// Where the elevation-contour tiles come from.
///
/// The URL template may contain `{key}`, replaced by the API key at
/// derivation time. The key is read from `api_key` or, failing that, from
/// the environment variable named by `api_key_env`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourSourceConfig {
    /// TileJSON URL template
    pub url: String,
    /// Literal API key (takes precedence over the environment)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for ContourSourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CONTOUR_URL.to_string(),
            api_key: None,
            api_key_env: DEFAULT_CONTOUR_KEY_ENV.to_string(),
        }
    }
}

impl ContourSourceConfig {
    /// API key from the config or the environment, if any.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        let literal = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        literal.or_else(|| {
            env::var(&self.api_key_env)
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty())
        })
    }

    /// URL with the key substituted, or `None` when a needed key is missing.
    #[must_use]
    pub fn resolve_url(&self) -> Option<String> {
        let template = self.url.trim();
        if template.is_empty() {
            return None;
        }
        if !template.contains(UNRESOLVED_KEY_PLACEHOLDER) {
            return Some(template.to_string());
        }
        let key = self.api_key()?;
        Some(template.replace(UNRESOLVED_KEY_PLACEHOLDER, &key))
    }
}

impl SourceLocator for ContourSourceConfig {
    fn locate(&self, source_id: &str) -> Option<SourceLocation> {
        if source_id != CONTOUR_SOURCE_ID {
            return None;
        }
        self.resolve_url().map(SourceLocation::Url)
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Derivation defaults
    pub derive: DeriveConfig,
    /// Contour tile source
    pub contours: ContourSourceConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// `POSTERSTYLE_CONFIG_DIR` wins when set, otherwise:
    /// - Linux: `~/.config/PosterStyle/`
    /// - macOS: `~/Library/Application Support/PosterStyle/`
    /// - Windows: `%APPDATA%\PosterStyle\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("PosterStyle");

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

    /// Loads configuration from a specific file, defaulting when it is absent.
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

    /// Saves configuration to the config file.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - the default palette name is not empty
    /// - the contour key variable name is not empty
    pub fn validate(&self) -> Result<()> {
        if self.derive.default_palette.trim().is_empty() {
            anyhow::bail!("derive.default_palette must not be empty");
        }
        if self.contours.api_key_env.trim().is_empty() {
            anyhow::bail!("contours.api_key_env must not be empty");
        }
        Ok(())
    }
}
