//! Pairing and classification against the expected-combination table.

use std::collections::HashMap;

use crate::domain::models::{
    Classification, GitHubIssueState, GitHubRef, IssueState, LinearIssue, MatchResult, RefKey,
    ResolvedRef,
};
use crate::services::lookup::FetchOutcome;

/// The expected (Linear status, GitHub state) combinations.
///
/// Single source of truth for classification; consult it only through
/// [`is_expected`].
const EXPECTED: &[(&str, IssueState)] = &[
    ("done", IssueState::Closed),
    ("backlog", IssueState::Open),
    ("canceled", IssueState::Closed),
    ("in review", IssueState::Open),
    ("todo", IssueState::Open),
    ("in progress", IssueState::Open),
];

/// Whether a (status, state) pair is an expected combination.
///
/// Status comparison is case-insensitive. An unknown state (failed
/// fetch) never matches any status: an unverifiable pairing must be
/// surfaced as a mismatch, not hidden.
pub fn is_expected(status: &str, state: IssueState) -> bool {
    if state == IssueState::Unknown {
        return false;
    }
    let status = status.trim().to_lowercase();
    EXPECTED.iter().any(|(s, st)| *s == status && *st == state)
}

/// Pair a Linear issue with its resolved GitHub references and classify.
///
/// Every reference gets a row in the result: a failed fetch is
/// materialized as an unknown state rather than dropped. An issue with
/// no references classifies as [`Classification::NoGithubLink`]; one
/// with references is a mismatch if ANY pair fails the table check.
pub fn classify(
    issue: LinearIssue,
    refs: Vec<GitHubRef>,
    outcomes: &HashMap<RefKey, FetchOutcome>,
) -> MatchResult {
    if refs.is_empty() {
        return MatchResult {
            issue,
            links: Vec::new(),
            classification: Classification::NoGithubLink,
        };
    }

    let links: Vec<ResolvedRef> = refs
        .into_iter()
        .map(|reference| {
            let state = match outcomes.get(&reference.key) {
                Some(Ok(state)) => state.clone(),
                // Failed fetch, or a reference the batch never resolved.
                _ => GitHubIssueState::unknown(reference.key.number),
            };
            ResolvedRef { reference, state }
        })
        .collect();

    let all_expected = links
        .iter()
        .all(|link| is_expected(&issue.status, link.state.state));

    MatchResult {
        issue,
        links,
        classification: if all_expected {
            Classification::MatchExpected
        } else {
            Classification::Mismatch
        },
    }
}
