use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

/// Prefix for environment overrides, e.g. `CONFIGURE_PROJECT_LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "CONFIGURE_PROJECT";

/// Main configuration structure for a configuration run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub walker: WalkerConfig,
    pub substitution: SubstitutionConfig,
    pub logging: LoggingConfig,
}

/// Directory traversal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Entry names skipped at any depth below the root. A value from a file
    /// or the environment replaces the defaults; `--exclude` appends.
    pub exclude: Vec<String>,
    pub follow_links: bool,
}

/// Substitution engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionConfig {
    /// Skip files that are not valid UTF-8 instead of failing the run
    pub skip_non_utf8: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            exclude: vec![".git".to_string(), "build".to_string()],
            follow_links: false,
        }
    }
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self { skip_non_utf8: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(), // pretty, json, compact
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. The explicit config file, if one was given
    /// 3. Environment variables (CONFIGURE_PROJECT_*)
    ///
    /// No file is discovered implicitly: the tree being configured is a
    /// template and must not be read for settings.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(file, env_source())
    }

    fn load_with_env(file: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder =
            ConfigBuilder::builder().add_source(ConfigBuilder::try_from(&Config::default())?);

        if let Some(file) = file {
            builder = builder.add_source(File::from(file).required(true));
        }

        let config = builder.add_source(environment).build()?;
        Ok(config.try_deserialize::<Config>()?)
    }

    /// Create a new Config for testing
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            walker: WalkerConfig::default(),
            substitution: SubstitutionConfig {
                skip_non_utf8: false,
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("walker.exclude")
        .try_parsing(true)
}
