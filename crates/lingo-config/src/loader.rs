//! Configuration loading utilities

use crate::I18nConfig;
use lingo_common::{LingoError, Result as LingoResult};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable pointing at the configuration file
pub const CONFIG_PATH_ENV: &str = "LINGO_CONFIG_PATH";

/// Configuration files probed, in order, when no path is given
const DEFAULT_CONFIG_FILES: [&str; 3] = ["lingo.yaml", "lingo.yml", "lingo.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for LingoError {
    fn from(err: ConfigError) -> Self {
        LingoError::config_with_source("Configuration loading error", err)
    }
}

/// Configuration loader for the localization settings
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<I18nConfig, ConfigError> {
        let path = path.as_ref();
        debug!("Loading configuration file: {:?}", path);

        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let mut config: I18nConfig = if is_toml {
            toml::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        info!(
            "Loaded configuration from {:?} (default language: {})",
            path, config.default_language
        );
        Ok(config)
    }

    /// Load configuration from `LINGO_CONFIG_PATH`, a default file in the
    /// working directory, or built-in defaults (always with env overrides)
    pub fn load() -> LingoResult<I18nConfig> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(&config_path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
        {
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = I18nConfig::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate_all().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LingoResult<I18nConfig> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut I18nConfig) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides using an arbitrary variable lookup
    pub fn apply_overrides_from<F>(config: &mut I18nConfig, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(language) = lookup("LINGO_DEFAULT_LANGUAGE") {
            config.default_language = language;
        }

        if let Some(value) = lookup("LINGO_ALLOW_MISSING") {
            config.allow_missing = parse_bool("LINGO_ALLOW_MISSING", &value)?;
        }

        if let Some(value) = lookup("LINGO_DEFAULT_LANGUAGE_ON_MISSING") {
            config.default_language_on_missing =
                parse_bool("LINGO_DEFAULT_LANGUAGE_ON_MISSING", &value)?;
        }

        if let Some(directory) = lookup("LINGO_LOCALES_DIR") {
            config.directory = Some(directory);
        }

        if let Some(value) = lookup("LINGO_USE_SESSION") {
            config.use_session = parse_bool("LINGO_USE_SESSION", &value)?;
        }

        if let Some(params) = lookup("LINGO_GLOBAL_PARAMS") {
            config.global_params = params
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(())
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    value
        .trim()
        .parse::<bool>()
        .map_err(|e| ConfigError::EnvParseError {
            var: var.to_string(),
            source: Box::new(e),
        })
}
