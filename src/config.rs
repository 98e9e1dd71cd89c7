//! Configuration for the garden validator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (garden.toml)
//! - Environment variables (GARDEN__*)
//!
//! ## Example config file (garden.toml):
//! ```toml
//! [data]
//! plants_dir = "./data"
//! garden_file = "./garden.json"
//!
//! [validation]
//! fail_fast = false
//! output_format = "pretty"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GardenConfig {
    /// Where the data files live
    #[serde(default)]
    pub data: DataConfig,

    /// Validation behavior
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Data file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding plant files
    #[serde(default = "default_plants_dir")]
    pub plants_dir: PathBuf,

    /// Default garden file when none is given on the command line
    #[serde(default)]
    pub garden_file: Option<PathBuf>,
}

/// Validation behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Stop at the first invalid file instead of reporting them all
    #[serde(default)]
    pub fail_fast: bool,

    /// Output format for reports
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Output format for JSON reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

fn default_plants_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            plants_dir: default_plants_dir(),
            garden_file: None,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            output_format: OutputFormat::Pretty,
        }
    }
}

impl GardenConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["garden.toml", ".garden.toml", "config/garden.toml"];
        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "garden", "garden-schemas")
        {
            let xdg_config = config_dir.config_dir().join("garden.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Environment variables (GARDEN__*)
        builder = builder.add_source(
            Environment::with_prefix("GARDEN")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
