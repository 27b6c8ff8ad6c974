//! End-to-end reconciliation over a mocked Linear API and an in-memory
//! GitHub lookup backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use mirrorcheck::adapters::linear::LinearClient;
use mirrorcheck::domain::models::LinearConfig;
use mirrorcheck::services::Reconciler;
use mirrorcheck::{
    Classification, DomainError, FetchError, GitHubIssueState, GitHubLookup, IssueState, RefKey,
};

/// Lookup backend with canned answers and a call counter.
struct CannedLookup {
    calls: AtomicUsize,
}

#[async_trait]
impl GitHubLookup for CannedLookup {
    async fn fetch_issue_state(&self, key: &RefKey) -> Result<GitHubIssueState, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match key.number {
            5164 => Ok(GitHubIssueState {
                number: 5164,
                title: "Mirrored bug".to_string(),
                state: IssueState::Open,
                url: None,
            }),
            77 => Ok(GitHubIssueState {
                number: 77,
                title: "Closed upstream".to_string(),
                state: IssueState::Open,
                url: None,
            }),
            404 => Err(FetchError::NotFound),
            other => Ok(GitHubIssueState {
                number: other,
                title: "whatever".to_string(),
                state: IssueState::Closed,
                url: None,
            }),
        }
    }
}

fn teams_body() -> String {
    serde_json::json!({
        "data": { "teams": { "nodes": [
            { "id": "team_moco", "name": "MojoCompiler", "key": "MOCO" },
            { "id": "team_moto", "name": "MojoTooling", "key": "MOTO" },
            { "id": "team_mstdl", "name": "MojoStdlib", "key": "MSTDL" }
        ]}}
    })
    .to_string()
}

fn issues_body() -> String {
    serde_json::json!({
        "data": { "team": { "issues": {
            "nodes": [
                {
                    "id": "lin_1", "identifier": "MOCO-2295",
                    "title": "Backlog item with open mirror",
                    "state": { "name": "Backlog" },
                    "attachments": { "nodes": [
                        { "url": "https://github.com/modular/mojo/issues/5164",
                          "title": "GitHub Issue" }
                    ]}
                },
                {
                    "id": "lin_2", "identifier": "MOCO-2296",
                    "title": "Done but mirror still open",
                    "description": "tracked in https://github.com/modular/mojo/issues/77",
                    "state": { "name": "Done" }
                },
                {
                    "id": "lin_3", "identifier": "MOCO-2297",
                    "title": "No links here, just #123 in prose",
                    "state": { "name": "Todo" }
                },
                {
                    "id": "lin_4", "identifier": "MOCO-2298",
                    "title": "Dangling mirror",
                    "description": "see https://github.com/modular/mojo/issues/404 and \
                                    a duplicate https://github.com/modular/mojo/issues/5164",
                    "state": { "name": "In Progress" }
                }
            ],
            "pageInfo": { "hasNextPage": false, "endCursor": null }
        }}}
    })
    .to_string()
}

fn reconciler(server: &mockito::ServerGuard, lookup: Arc<CannedLookup>) -> Reconciler {
    let config = LinearConfig { api_url: server.url(), page_size: 200 };
    let linear = LinearClient::new(&config, "lin_api_test");
    Reconciler::new(linear, lookup, 4)
}

#[tokio::test]
async fn team_run_classifies_and_deduplicates() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(mockito::Matcher::Regex("teams".to_string()))
        .with_status(200)
        .with_body(teams_body())
        .create_async()
        .await;
    server
        .mock("POST", "/")
        .match_body(mockito::Matcher::Regex("TeamIssues".to_string()))
        .with_status(200)
        .with_body(issues_body())
        .create_async()
        .await;

    let lookup = Arc::new(CannedLookup { calls: AtomicUsize::new(0) });
    let report = reconciler(&server, Arc::clone(&lookup))
        .reconcile_team("moco", None)
        .await
        .unwrap();

    assert_eq!(report.team.key, "MOCO");
    assert_eq!(report.stats.issues_processed, 4);
    assert_eq!(report.stats.issues_with_links, 3);
    assert_eq!(report.stats.fetch_failures, 1);

    let by_id = |id: &str| {
        report
            .results
            .iter()
            .find(|r| r.issue.identifier == id)
            .unwrap_or_else(|| panic!("missing {id}"))
    };

    // Backlog + open: expected.
    assert_eq!(by_id("MOCO-2295").classification, Classification::MatchExpected);
    // Done + open: mismatch.
    assert_eq!(by_id("MOCO-2296").classification, Classification::Mismatch);
    // No refs extracted despite "#123" in the title.
    assert_eq!(by_id("MOCO-2297").classification, Classification::NoGithubLink);
    // Failed fetch surfaces as unknown -> mismatch; the duplicate 5164
    // link still resolves from the shared fetch.
    let dangling = by_id("MOCO-2298");
    assert_eq!(dangling.classification, Classification::Mismatch);
    assert_eq!(dangling.links.len(), 2);
    assert!(dangling
        .links
        .iter()
        .any(|l| l.state.state == IssueState::Unknown));

    // 5164 is referenced by two issues but fetched once: 5164, 77, 404.
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn unknown_team_lists_alternatives() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body(teams_body())
        .create_async()
        .await;

    let lookup = Arc::new(CannedLookup { calls: AtomicUsize::new(0) });
    let err = reconciler(&server, Arc::clone(&lookup))
        .reconcile_team("INVALID_TEAM", None)
        .await
        .unwrap_err();

    match err {
        DomainError::TeamNotFound { selector, known } => {
            assert_eq!(selector, "INVALID_TEAM");
            assert_eq!(known.len(), 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    // No GitHub fetch may happen when team resolution fails.
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
}
