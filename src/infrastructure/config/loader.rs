//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid page_size: {0}. Must be between 1 and 250")]
    InvalidPageSize(usize),

    #[error("Invalid max_concurrency: {0}. Must be between 1 and 32")]
    InvalidConcurrency(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("linear.api_url cannot be empty")]
    EmptyLinearUrl,

    #[error("github.api_url cannot be empty")]
    EmptyGithubUrl,
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. mirrorcheck.yaml in the working directory (optional)
    /// 3. Environment variables (MIRRORCHECK_* prefix)
    ///
    /// API tokens are not part of this config; see
    /// [`super::ApiTokens`].
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("mirrorcheck.yaml"))
            .merge(Env::prefixed("MIRRORCHECK_").split("__"))
            .extract()
            .context("Failed to extract configuration")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.linear.page_size == 0 || config.linear.page_size > 250 {
            return Err(ConfigError::InvalidPageSize(config.linear.page_size));
        }
        if config.linear.api_url.is_empty() {
            return Err(ConfigError::EmptyLinearUrl);
        }

        if config.github.max_concurrency == 0 || config.github.max_concurrency > 32 {
            return Err(ConfigError::InvalidConcurrency(config.github.max_concurrency));
        }
        if config.github.api_url.is_empty() {
            return Err(ConfigError::EmptyGithubUrl);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}
