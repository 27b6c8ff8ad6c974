//! Domain errors for the mirrorcheck reconciliation run.

use thiserror::Error;

/// Errors that resolve identity or abort the run.
///
/// Failures scoped to a single GitHub reference are *not* represented
/// here; those are [`FetchError`] values contained at the lookup
/// boundary and downgraded to an unknown state downstream.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Team not found: {selector}. Known teams: {}", known.join(", "))]
    TeamNotFound { selector: String, known: Vec<String> },

    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    #[error("Invalid issue identifier: {0} (expected the form TEAM-123)")]
    InvalidIdentifier(String),

    #[error("Transient error: {0}")]
    Transient(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            DomainError::Transient(err.to_string())
        } else {
            DomainError::Api(err.to_string())
        }
    }
}

/// Per-reference failure from a GitHub lookup backend.
///
/// Never fatal: the batch records the error against the reference and
/// carries on, and classification treats the reference as having an
/// unknown state (which never satisfies the expected-combination table).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("issue not found")]
    NotFound,

    #[error("access forbidden")]
    Forbidden,

    #[error("rate limited")]
    RateLimited,

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}
