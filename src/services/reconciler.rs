//! Run orchestration: fetch issues, extract references, fan out the
//! GitHub lookups, classify.

use std::sync::Arc;

use crate::adapters::linear::LinearClient;
use crate::domain::errors::DomainResult;
use crate::domain::models::{GitHubRef, LinearIssue, MatchResult, RunStats, TeamReport};
use crate::domain::ports::GitHubLookup;
use crate::services::{extractor, lookup, matcher};

/// Drives a reconciliation run over a Linear client and a GitHub
/// lookup backend.
pub struct Reconciler {
    linear: LinearClient,
    github: Arc<dyn GitHubLookup>,
    max_concurrency: usize,
}

impl Reconciler {
    pub fn new(linear: LinearClient, github: Arc<dyn GitHubLookup>, max_concurrency: usize) -> Self {
        Self { linear, github, max_concurrency }
    }

    /// Reconcile a single issue by its identifier (e.g. "MOCO-1233").
    ///
    /// # Errors
    ///
    /// Fails if the identifier is malformed, the issue does not exist,
    /// or the Linear API cannot be reached. GitHub lookup failures do
    /// not fail the call; they surface as unknown states in the result.
    pub async fn reconcile_issue(&self, identifier: &str) -> DomainResult<MatchResult> {
        let issue = self.linear.fetch_issue(identifier).await?;
        let refs = extractor::extract_issue_refs(&issue);
        let outcomes =
            lookup::fetch_many(Arc::clone(&self.github), refs.clone(), self.max_concurrency).await;
        Ok(matcher::classify(issue, refs, &outcomes))
    }

    /// Reconcile every issue of a team, optionally capped at
    /// `stop_after` issues in paginated fetch order.
    ///
    /// All references across the capped issue set go through one
    /// deduplicated fan-out before classification.
    ///
    /// # Errors
    ///
    /// Fails if the team selector cannot be resolved (the error lists
    /// the known teams) or the Linear API cannot be reached.
    pub async fn reconcile_team(
        &self,
        selector: &str,
        stop_after: Option<usize>,
    ) -> DomainResult<TeamReport> {
        let team = self.linear.resolve_team(selector).await?;
        tracing::info!(team = %team.key, name = %team.name, "resolved team");

        let issues = self.linear.fetch_team_issues(&team.id, stop_after).await?;
        tracing::info!(count = issues.len(), "fetched issues; extracting references");

        let extracted: Vec<(LinearIssue, Vec<GitHubRef>)> = issues
            .into_iter()
            .map(|issue| {
                let refs = extractor::extract_issue_refs(&issue);
                (issue, refs)
            })
            .collect();

        let all_refs = extracted.iter().flat_map(|(_, refs)| refs.iter().cloned());
        let outcomes =
            lookup::fetch_many(Arc::clone(&self.github), all_refs, self.max_concurrency).await;

        let mut stats = RunStats {
            issues_processed: extracted.len(),
            issues_with_links: 0,
            fetch_failures: outcomes.values().filter(|outcome| outcome.is_err()).count(),
        };

        let results: Vec<MatchResult> = extracted
            .into_iter()
            .map(|(issue, refs)| {
                if !refs.is_empty() {
                    stats.issues_with_links += 1;
                }
                matcher::classify(issue, refs, &outcomes)
            })
            .collect();

        Ok(TeamReport { team, results, stats })
    }
}
