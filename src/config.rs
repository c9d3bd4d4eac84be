//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory
//! 3. The file passed with `--config`
//! 4. `FILEHUB_*` environment variables (`FILEHUB_API_URL`, `FILEHUB_TIMEOUT_SECS`, ...)
//! 5. Command-line flags, applied by [`Config::with_cli_overrides`]
//!
//! # Example
//!
//! ```toml
//! api_url = "https://files.example.com"
//! timeout_secs = 10
//! output = "json"
//! color = false
//! ```

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::cli::{Cli, OutputFormat};

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "FILEHUB_";

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer could not be read or did not match the expected shape.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),

    /// A file named explicitly does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// The platform config directory could not be determined.
    #[error("could not determine the platform config directory")]
    NoConfigDir,

    /// Writing the file failed.
    #[error("failed to write config file: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing to TOML failed.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the storage backend
    pub api_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Default output format for `list`
    pub output: OutputFormat,
    /// Use colors when writing to a terminal
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            output: OutputFormat::Table,
            color: true,
        }
    }
}

impl Config {
    /// Load every layer up to the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `explicit` is given but missing, or if any layer
    /// holds a value of the wrong type.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
        }
        let config: Self = Self::figment(Self::config_path().as_deref(), explicit).extract()?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Build the layered provider without extracting it.
    ///
    /// Missing files are skipped silently.
    #[must_use]
    pub fn figment(platform: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = platform {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Apply command-line flags on top of the loaded layers.
    #[must_use]
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.api_url {
            self.api_url = url.clone();
        }
        if let Some(secs) = cli.timeout {
            self.timeout_secs = secs;
        }
        if cli.no_color {
            self.color = false;
        }
        self
    }

    /// Request timeout as a duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        log::info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Write the configuration to the platform config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory is unknown or writing fails.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Platform-specific config file path, if a home directory is known.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "filehub", "filehub").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
