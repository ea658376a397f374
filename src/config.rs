//! Configuration schema and YAML loading.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::store::DEFAULT_CITY;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration schema.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Config schema version.
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub data: DataConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            app: AppConfig::default(),
            observability: ObservabilityConfig::default(),
            data: DataConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
        }
    }
}

fn default_app_name() -> String {
    "query-agent".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Reference data sources.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Knowledge-base JSON file; the bundled table is used when unset.
    #[serde(default)]
    pub kb_path: Option<PathBuf>,
    /// City used when a query names no known city.
    #[serde(default = "default_city")]
    pub default_city: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            kb_path: None,
            default_city: default_city(),
        }
    }
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

/// Load configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<AgentConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: AgentConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;

    // Relative data paths are resolved against the config file location.
    if let (Some(kb_path), Some(base)) = (&config.data.kb_path, path.parent()) {
        if kb_path.is_relative() {
            config.data.kb_path = Some(base.join(kb_path));
        }
    }
    Ok(config)
}

pub fn validate_config(config: &AgentConfig) -> Result<(), ConfigError> {
    if config.version == 0 {
        return Err(ConfigError::Invalid(
            "version must be greater than 0".to_string(),
        ));
    }

    if config.app.name.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "app.name must not be empty".to_string(),
        ));
    }

    if config.data.default_city.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "data.default_city must not be empty".to_string(),
        ));
    }

    Ok(())
}
