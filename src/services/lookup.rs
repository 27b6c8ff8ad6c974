//! Batch GitHub lookup: dedup, bounded fan-out, failure isolation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::stream::StreamExt;

use crate::domain::errors::FetchError;
use crate::domain::models::{GitHubIssueState, GitHubRef, RefKey};
use crate::domain::ports::GitHubLookup;

/// Per-reference result stored in the batch map.
pub type FetchOutcome = Result<GitHubIssueState, FetchError>;

/// Resolve a batch of references through the given backend.
///
/// References are deduplicated by (owner, repo, number) so each unique
/// issue is fetched exactly once, even when linked from several Linear
/// issues. At most `max_concurrency` lookups are in flight at a time.
/// A failure fetching one reference is recorded against that reference
/// and never aborts the rest of the batch.
pub async fn fetch_many(
    backend: Arc<dyn GitHubLookup>,
    refs: impl IntoIterator<Item = GitHubRef>,
    max_concurrency: usize,
) -> HashMap<RefKey, FetchOutcome> {
    let mut seen = HashSet::new();
    let unique: Vec<RefKey> = refs
        .into_iter()
        .map(|r| r.key)
        .filter(|key| seen.insert(key.clone()))
        .collect();

    let total = unique.len();
    tracing::debug!(unique = total, cap = max_concurrency, "starting GitHub fan-out");

    let mut in_flight = futures::stream::iter(unique.into_iter().map(|key| {
        let backend = Arc::clone(&backend);
        async move {
            let outcome = backend.fetch_issue_state(&key).await;
            (key, outcome)
        }
    }))
    .buffer_unordered(max_concurrency.max(1));

    // Collecting here is the single writer of the result map.
    let mut results = HashMap::with_capacity(total);
    while let Some((key, outcome)) = in_flight.next().await {
        if let Err(err) = &outcome {
            tracing::warn!(reference = %key, error = %err, "GitHub lookup failed; recording unknown state");
        }
        results.insert(key, outcome);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::domain::models::{BlobSource, IssueState};

    /// Mock backend that counts calls and tracks peak concurrency.
    struct MockLookup {
        calls: AtomicUsize,
        current: AtomicUsize,
        peak: AtomicUsize,
        fail_number: Option<u64>,
    }

    impl MockLookup {
        fn new(fail_number: Option<u64>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                current: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
                fail_number,
            }
        }
    }

    #[async_trait]
    impl GitHubLookup for MockLookup {
        async fn fetch_issue_state(&self, key: &RefKey) -> FetchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);

            if self.fail_number == Some(key.number) {
                return Err(FetchError::NotFound);
            }
            Ok(GitHubIssueState {
                number: key.number,
                title: format!("issue {}", key.number),
                state: IssueState::Open,
                url: None,
            })
        }
    }

    fn reference(number: u64) -> GitHubRef {
        GitHubRef::new(RefKey::new("o", "r", number), BlobSource::Description)
    }

    #[tokio::test]
    async fn duplicate_refs_trigger_one_fetch() {
        let backend = Arc::new(MockLookup::new(None));
        // Same key referenced from two "issues" (different sources too).
        let refs = vec![
            reference(1),
            GitHubRef::new(RefKey::new("o", "r", 1), BlobSource::Comment(0)),
            reference(2),
        ];
        let results = fetch_many(Arc::clone(&backend) as Arc<dyn GitHubLookup>, refs, 4).await;
        assert_eq!(results.len(), 2);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_the_batch() {
        let backend = Arc::new(MockLookup::new(Some(2)));
        let refs = vec![reference(1), reference(2), reference(3)];
        let results = fetch_many(Arc::clone(&backend) as Arc<dyn GitHubLookup>, refs, 4).await;
        assert_eq!(results.len(), 3);
        assert!(results[&RefKey::new("o", "r", 1)].is_ok());
        assert_eq!(
            results[&RefKey::new("o", "r", 2)],
            Err(FetchError::NotFound)
        );
        assert!(results[&RefKey::new("o", "r", 3)].is_ok());
    }

    #[tokio::test]
    async fn concurrency_never_exceeds_the_cap() {
        let backend = Arc::new(MockLookup::new(None));
        let refs: Vec<_> = (1..=20).map(reference).collect();
        let results = fetch_many(Arc::clone(&backend) as Arc<dyn GitHubLookup>, refs, 3).await;
        assert_eq!(results.len(), 20);
        assert!(
            backend.peak.load(Ordering::SeqCst) <= 3,
            "peak in-flight was {}",
            backend.peak.load(Ordering::SeqCst)
        );
    }

    #[tokio::test]
    async fn empty_batch_returns_empty_map() {
        let backend = Arc::new(MockLookup::new(None));
        let results = fetch_many(backend as Arc<dyn GitHubLookup>, Vec::new(), 4).await;
        assert!(results.is_empty());
    }
}
