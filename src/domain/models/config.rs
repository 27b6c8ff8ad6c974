//! Runtime configuration.
//!
//! Each client owns its own configuration section; nothing is read from
//! ambient globals after startup. Secrets (API tokens) are deliberately
//! not part of this struct; they come from the process environment, see
//! [`crate::infrastructure::config::ApiTokens`].

use serde::{Deserialize, Serialize};

/// Top-level configuration, merged by the loader from defaults, an
/// optional YAML file, and `MIRRORCHECK_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub linear: LinearConfig,
    pub github: GitHubConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            linear: LinearConfig::default(),
            github: GitHubConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Linear GraphQL API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearConfig {
    /// GraphQL endpoint.
    pub api_url: String,
    /// Issues fetched per pagination request (1..=250).
    pub page_size: usize,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.linear.app/graphql".to_string(),
            page_size: 200,
        }
    }
}

/// Which GitHub lookup backend to use.
///
/// The CLI backend is preferred: it reuses `gh`'s own authentication and
/// never needs a raw token in the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitHubBackend {
    Cli,
    Rest,
}

/// GitHub lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub backend: GitHubBackend,
    /// REST API base URL (only used by the REST backend).
    pub api_url: String,
    /// Parallelism cap for the batch fan-out (1..=32).
    pub max_concurrency: usize,
    /// Bounded retries per reference on transient failures.
    pub max_retries: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            backend: GitHubBackend::Cli,
            api_url: "https://api.github.com".to_string(),
            max_concurrency: 8,
            max_retries: 2,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.linear.page_size, 200);
        assert_eq!(config.github.backend, GitHubBackend::Cli);
        assert_eq!(config.github.max_concurrency, 8);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn backend_deserializes_lowercase() {
        let backend: GitHubBackend = serde_json::from_str("\"rest\"").unwrap();
        assert_eq!(backend, GitHubBackend::Rest);
        let backend: GitHubBackend = serde_json::from_str("\"cli\"").unwrap();
        assert_eq!(backend, GitHubBackend::Cli);
    }
}
