//! Configuration management for the `ShelterSeek` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::ShelterSeekError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `ShelterSeek` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelterSeekConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// ZIP reference dataset configuration
    #[serde(default)]
    pub dataset: DatasetConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default search settings
    #[serde(default)]
    pub search: SearchConfig,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the directory listens on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// ZIP reference dataset configuration settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to a JSON ZIP reference file; the bundled dataset is used when unset
    #[serde(default)]
    pub path: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// ZIP code used when a search omits one
    #[serde(default = "default_search_zip")]
    pub default_zip: String,
    /// Radius in miles used when a search omits one
    #[serde(default = "default_search_radius")]
    pub default_radius_miles: u32,
    /// Smallest accepted search radius in miles
    #[serde(default = "default_min_radius")]
    pub min_radius_miles: u32,
    /// Largest accepted search radius in miles
    #[serde(default = "default_max_radius")]
    pub max_radius_miles: u32,
    /// Photo URL substituted when a shelter form leaves the photo blank
    #[serde(default = "default_placeholder_photo")]
    pub placeholder_photo: String,
}

// Default value functions
fn default_server_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_search_zip() -> String {
    "36830".to_string()
}

fn default_search_radius() -> u32 {
    10
}

fn default_min_radius() -> u32 {
    1
}

fn default_max_radius() -> u32 {
    50
}

fn default_placeholder_photo() -> String {
    "static/shelterseek/logo.png".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_zip: default_search_zip(),
            default_radius_miles: default_search_radius(),
            min_radius_miles: default_min_radius(),
            max_radius_miles: default_max_radius(),
            placeholder_photo: default_placeholder_photo(),
        }
    }
}

impl Default for ShelterSeekConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            dataset: DatasetConfig::default(),
            logging: LoggingConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl ShelterSeekConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with SHELTERSEEK_ prefix
        builder = builder.add_source(
            Environment::with_prefix("SHELTERSEEK")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: ShelterSeekConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shelterseek").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_search_settings()?;
        self.validate_logging_settings()?;
        Ok(())
    }

    /// Validate default-search configuration
    fn validate_search_settings(&self) -> Result<()> {
        if self.search.default_zip.len() != 5
            || !self.search.default_zip.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ShelterSeekError::config(
                "Default ZIP must be a 5-digit numeric code",
            )
            .into());
        }

        if self.search.min_radius_miles == 0 {
            return Err(
                ShelterSeekError::config("Minimum search radius must be at least 1 mile").into(),
            );
        }

        if self.search.max_radius_miles > 100 {
            return Err(
                ShelterSeekError::config("Maximum search radius cannot exceed 100 miles").into(),
            );
        }

        if self.search.min_radius_miles > self.search.max_radius_miles {
            return Err(ShelterSeekError::config(
                "Minimum search radius cannot exceed the maximum search radius",
            )
            .into());
        }

        if self.search.default_radius_miles < self.search.min_radius_miles
            || self.search.default_radius_miles > self.search.max_radius_miles
        {
            return Err(ShelterSeekError::config(
                "Default search radius must fall within the configured radius bounds",
            )
            .into());
        }

        Ok(())
    }

    /// Validate logging configuration values
    fn validate_logging_settings(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ShelterSeekError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ShelterSeekError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
