//! GitHub lookup capability.
//!
//! Two interchangeable backends implement this port: a delegate that
//! shells out to the pre-authenticated `gh` CLI, and a direct REST
//! client. The fan-out layer and everything above it only see the trait.

use async_trait::async_trait;

use crate::domain::errors::FetchError;
use crate::domain::models::{GitHubIssueState, RefKey};

/// Single-method capability: resolve one GitHub issue reference.
#[async_trait]
pub trait GitHubLookup: Send + Sync {
    /// Fetch the current state of the referenced issue.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] scoped to this reference. Callers must
    /// treat it as a per-reference outcome, never as a batch failure.
    async fn fetch_issue_state(&self, key: &RefKey) -> Result<GitHubIssueState, FetchError>;
}
