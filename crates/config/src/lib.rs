#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for dna
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/dna/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod constants;
mod core;
mod paths;

pub use core::{CatalogConfig, GeneralConfig, MeshConfig, NetworkConfig, PathConfig};
pub use paths::DnaPaths;

use dna_errors::{ConfigError, Error};
use dna_types::{ColorChoice, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub mesh: MeshConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("dna").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let Ok(config_path) = Self::default_path() else {
            return Ok(Self::default());
        };

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge values from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns an error for values that cannot be parsed.
    pub fn merge_vars<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        // DNA_HOME
        if let Some(home) = lookup("DNA_HOME") {
            if home.trim().is_empty() {
                return Err(invalid("DNA_HOME", home));
            }
            self.paths.home = Some(PathBuf::from(home));
        }

        // DNA_OUTPUT
        if let Some(output) = lookup("DNA_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => return Err(invalid("DNA_OUTPUT", output)),
            };
        }

        // DNA_COLOR
        if let Some(color) = lookup("DNA_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => return Err(invalid("DNA_COLOR", color)),
            };
        }

        // DNA_TIMEOUT
        if let Some(timeout) = lookup("DNA_TIMEOUT") {
            self.network.timeout = match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(invalid("DNA_TIMEOUT", timeout)),
            };
        }

        // DNA_ENDPOINTS
        if let Some(endpoints) = lookup("DNA_ENDPOINTS") {
            let parsed: Vec<String> = endpoints
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(ToString::to_string)
                .collect();
            if parsed.is_empty() {
                return Err(invalid("DNA_ENDPOINTS", endpoints));
            }
            self.mesh.endpoints = parsed;
        }

        Ok(())
    }

    /// Resolve the local directory layout
    ///
    /// # Errors
    ///
    /// Returns an error if no base directory is configured and the user's
    /// home directory cannot be determined.
    pub fn dna_paths(&self) -> Result<DnaPaths, Error> {
        match &self.paths.home {
            Some(home) => Ok(DnaPaths::new(home.clone())),
            None => DnaPaths::user_default(),
        }
    }

    /// Endpoints a fresh state starts with
    #[must_use]
    pub fn default_endpoints(&self) -> Vec<String> {
        if self.mesh.endpoints.is_empty() {
            constants::default_endpoints()
        } else {
            self.mesh.endpoints.clone()
        }
    }

    /// Endpoint list pinned by configuration, if any
    #[must_use]
    pub fn pinned_endpoints(&self) -> Option<&[String]> {
        if self.mesh.endpoints.is_empty() {
            None
        } else {
            Some(&self.mesh.endpoints)
        }
    }

    /// User agent for outgoing requests
    #[must_use]
    pub fn user_agent(&self) -> String {
        self.network
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("dna/{}", env!("CARGO_PKG_VERSION")))
    }
}

fn invalid(field: &str, value: String) -> Error {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value,
    }
    .into()
}
