//! Configuration management for leibniz-pi
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.leibniz-pi/config.toml

use crate::cli::args::OutputFormat;
use crate::errors::{EstimatorError, Result};
use crate::series::EstimatorConfig;
use crate::types::iteration::{IterationCount, DEFAULT_ITERATIONS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete configuration for leibniz-pi
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub estimator: EstimatorSection,
    #[serde(default)]
    pub output: OutputSection,
}

/// Estimator defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSection {
    /// Signed so that a negative value is reported, not silently clamped
    pub iterations: i64,
    pub verbose: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub color: bool,
    pub format: String,
}

impl Default for EstimatorSection {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS as i64,
            verbose: true,
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            color: true,
            format: "text".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path)
            .map_err(|e| EstimatorError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| EstimatorError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        tracing::debug!("no config file found, using built-in defaults");
        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".leibniz-pi").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.iteration_count()?;
        self.output_format()?;
        Ok(())
    }

    /// Configured iteration count
    pub fn iteration_count(&self) -> Result<IterationCount> {
        IterationCount::try_from(self.estimator.iterations)
    }

    /// Configured output format
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.output.format.parse()
    }

    /// Estimator configuration described by this file
    pub fn estimator_config(&self) -> Result<EstimatorConfig> {
        Ok(EstimatorConfig {
            iterations: self.iteration_count()?,
            verbose: self.estimator.verbose,
        })
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| EstimatorError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| EstimatorError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EstimatorError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}
