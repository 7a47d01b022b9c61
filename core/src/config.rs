//! Configuration types for tfdemo-rs.

use serde::Deserialize;
use std::path::PathBuf;

use crate::inference::MODEL_FILE;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Model configuration.
    #[serde(default)]
    pub model: ModelConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Model configuration.
#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Directory that bundled assets are resolved against.
    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,

    /// Asset URI of the graph to load.
    #[serde(default = "default_model_file")]
    pub model_file: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            asset_dir: default_asset_dir(),
            model_file: default_model_file(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Maximum log level (error, warn, info, debug, trace).
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_model_file() -> String {
    MODEL_FILE.to_string()
}

fn default_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> crate::error::Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.model.model_file.trim().is_empty() {
            return Err(crate::error::TfDemoError::config("model_file is empty"));
        }
        match self.logging.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(crate::error::TfDemoError::config(format!(
                "Invalid log level: {}",
                other
            ))),
        }
    }
}
