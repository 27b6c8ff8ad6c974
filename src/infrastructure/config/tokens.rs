//! API tokens from the process environment.
//!
//! Tokens are kept out of the figment config on purpose: they are
//! secrets, sourced from the environment (a `.env` file is loaded by
//! `main` before this runs). The GitHub token is optional and only
//! relevant to the REST backend, which warns about it lazily.

use crate::domain::errors::{DomainError, DomainResult};

/// Environment variable holding the Linear API token.
pub const LINEAR_TOKEN_VAR: &str = "LINEAR_API_TOKEN";
/// Environment variable holding the optional GitHub token.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// API tokens read once at startup.
#[derive(Debug, Clone, Default)]
pub struct ApiTokens {
    pub linear: Option<String>,
    pub github: Option<String>,
}

impl ApiTokens {
    /// Read both tokens from the environment; empty values count as
    /// absent.
    pub fn from_env() -> Self {
        Self {
            linear: read_var(LINEAR_TOKEN_VAR),
            github: read_var(GITHUB_TOKEN_VAR),
        }
    }

    /// The Linear token is mandatory for every run.
    ///
    /// # Errors
    ///
    /// `DomainError::Auth` with an actionable message if it is missing.
    pub fn require_linear(&self) -> DomainResult<&str> {
        self.linear.as_deref().ok_or_else(|| {
            DomainError::Auth(format!(
                "{LINEAR_TOKEN_VAR} is required. Add it to your .env file or get a token \
                 from https://linear.app/settings/api"
            ))
        })
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
