//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Command-line arguments, which take precedence at the call sites

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Normalization defaults
    pub defaults: DefaultsConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (human, json, json-pretty, yaml)
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no -v flag is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

/// Defaults applied to rule documents that do not decide for themselves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Keep unconsumed fields when neither the command line nor the document says
    pub preserve: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?,
            _ => serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?,
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".normalize.yaml"),
            PathBuf::from(".normalize.json"),
            PathBuf::from(".normalize.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let normalize_dir = config_dir.join("normalize");
            paths.push(normalize_dir.join("config.yaml"));
            paths.push(normalize_dir.join("config.json"));
            paths.push(normalize_dir.join("config.toml"));
        }

        paths
    }

    /// Configured output format, if it names a known one
    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_name(&self.output.format).ok_or_else(|| {
            Error::config(format!(
                "unknown output format '{}' (expected human, json, json-pretty or yaml)",
                self.output.format
            ))
        })
    }
}
