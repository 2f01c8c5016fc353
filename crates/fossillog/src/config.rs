//! Configuration management for fossillog.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use chrono::{Datelike, Local};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "fossillog";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FOSSILLOG_`, `__` between keys)
/// 2. TOML config file at `~/.config/fossillog/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog configuration.
    pub catalog: CatalogConfig,
    /// Form configuration.
    pub form: FormConfig,
}

/// Where the taxonomy comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to a taxonomy JSON file.
    /// Defaults to the catalog bundled with the binary.
    pub path: Option<PathBuf>,
}

/// New-find form behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Start the date pickers at today's date.
    pub prefill_today: bool,
    /// Oldest year offered by the year picker.
    pub earliest_year: i32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            prefill_today: true,
            earliest_year: 1900,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("FOSSILLOG_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.form.earliest_year < 1 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "earliest_year ({}) must be at least 1",
                    self.form.earliest_year
                ),
            });
        }

        let current_year = Local::now().year();
        if self.form.earliest_year > current_year {
            return Err(Error::ConfigValidation {
                message: format!(
                    "earliest_year ({}) cannot be after the current year ({current_year})",
                    self.form.earliest_year
                ),
            });
        }

        Ok(())
    }

    /// Load the configured catalog, or the bundled one if none is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or parsed.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog.path {
            Some(path) => Catalog::load(path),
            None => Catalog::bundled(),
        }
    }
}
