//! GitHub-side domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::linear::BlobSource;

/// State of a GitHub issue or pull request.
///
/// `Unknown` is the explicit marker for a reference whose fetch failed;
/// it is surfaced downstream instead of being dropped, and it never
/// satisfies the expected-combination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
    Unknown,
}

impl IssueState {
    /// Parse the state string an API returns. GitHub's REST API uses
    /// lowercase, the `gh` CLI uppercase; anything else maps to `Unknown`.
    pub fn from_api(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "open" => IssueState::Open,
            "closed" => IssueState::Closed,
            _ => IssueState::Unknown,
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Open => write!(f, "open"),
            IssueState::Closed => write!(f, "closed"),
            IssueState::Unknown => write!(f, "unknown"),
        }
    }
}

/// Identity of a GitHub issue: (owner, repo, number).
///
/// This is the deduplication key for lookups; two references with the
/// same `RefKey` are fetched exactly once per run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RefKey {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl RefKey {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self { owner: owner.into(), repo: repo.into(), number }
    }
}

impl fmt::Display for RefKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// A GitHub reference extracted from a Linear issue's text.
///
/// The source blob is diagnostic context only: it tells a reader where
/// the link was found, and plays no part in matching or deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubRef {
    pub key: RefKey,
    pub source: BlobSource,
}

impl GitHubRef {
    pub fn new(key: RefKey, source: BlobSource) -> Self {
        Self { key, source }
    }
}

/// Resolved state of a GitHub issue, fetched once per unique [`RefKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubIssueState {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub url: Option<String>,
}

impl GitHubIssueState {
    /// The placeholder recorded when a reference could not be fetched.
    pub fn unknown(number: u64) -> Self {
        Self { number, title: String::new(), state: IssueState::Unknown, url: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_from_api_accepts_both_cases() {
        assert_eq!(IssueState::from_api("open"), IssueState::Open);
        assert_eq!(IssueState::from_api("OPEN"), IssueState::Open);
        assert_eq!(IssueState::from_api("Closed"), IssueState::Closed);
        assert_eq!(IssueState::from_api("merged"), IssueState::Unknown);
        assert_eq!(IssueState::from_api(""), IssueState::Unknown);
    }

    #[test]
    fn ref_key_display() {
        let key = RefKey::new("modular", "mojo", 5164);
        assert_eq!(key.to_string(), "modular/mojo#5164");
    }
}
