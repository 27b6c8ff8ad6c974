//! Reconciliation results.

use std::fmt;

use serde::Serialize;

use super::github::{GitHubIssueState, GitHubRef};
use super::linear::{LinearIssue, LinearTeam};

/// How a Linear issue relates to its mirrored GitHub issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Every (status, state) pair is in the expected-combination table.
    MatchExpected,
    /// At least one pair is absent from the table, or a state is unknown.
    Mismatch,
    /// No GitHub reference was extracted from the issue's text.
    NoGithubLink,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::MatchExpected => write!(f, "match-expected"),
            Classification::Mismatch => write!(f, "mismatch"),
            Classification::NoGithubLink => write!(f, "no-github-link"),
        }
    }
}

/// A reference joined with its fetched state.
///
/// A failed fetch is materialized as an unknown state so the reference
/// stays visible in the report instead of silently disappearing.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedRef {
    pub reference: GitHubRef,
    pub state: GitHubIssueState,
}

/// A Linear issue paired with its resolved GitHub references and the
/// classification computed from the expected-combination table.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub issue: LinearIssue,
    pub links: Vec<ResolvedRef>,
    pub classification: Classification,
}

/// Counters accumulated over a bulk run, for the summary footer.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunStats {
    pub issues_processed: usize,
    pub issues_with_links: usize,
    pub fetch_failures: usize,
}

/// Output of a whole-team reconciliation.
#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub team: LinearTeam,
    pub results: Vec<MatchResult>,
    pub stats: RunStats,
}
