//! Direct REST backend for GitHub issue lookups.

use std::sync::Once;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::errors::FetchError;
use crate::domain::models::{GitHubIssueState, IssueState, RefKey};
use crate::domain::ports::GitHubLookup;

/// REST client for `GET /repos/{owner}/{repo}/issues/{number}`.
///
/// Works unauthenticated at a much lower rate limit; the missing-token
/// warning is emitted once, on the first actual call, never at
/// construction time.
pub struct GitHubRestLookup {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
    max_retries: u32,
    token_warning: Once,
}

impl GitHubRestLookup {
    pub fn new(api_url: &str, token: Option<String>, max_retries: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            max_retries,
            token_warning: Once::new(),
        }
    }

    fn warn_if_unauthenticated(&self) {
        if self.token.is_none() {
            self.token_warning.call_once(|| {
                tracing::warn!(
                    "GITHUB_TOKEN not set; using unauthenticated requests with lower rate limits. \
                     Get a token from https://github.com/settings/tokens"
                );
            });
        }
    }
}

#[derive(Debug, Deserialize)]
struct RestIssue {
    number: u64,
    title: String,
    state: String,
    #[serde(default)]
    html_url: Option<String>,
}

impl From<RestIssue> for GitHubIssueState {
    fn from(issue: RestIssue) -> Self {
        GitHubIssueState {
            number: issue.number,
            title: issue.title,
            state: IssueState::from_api(&issue.state),
            url: issue.html_url,
        }
    }
}

/// Whether a 403 is a rate-limit response (retryable) rather than a
/// plain permission denial.
fn is_rate_limit(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "0")
}

#[async_trait]
impl GitHubLookup for GitHubRestLookup {
    async fn fetch_issue_state(&self, key: &RefKey) -> Result<GitHubIssueState, FetchError> {
        self.warn_if_unauthenticated();

        let url = format!(
            "{}/repos/{}/{}/issues/{}",
            self.api_url, key.owner, key.repo, key.number
        );

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let mut request = self
                .http
                .get(&url)
                .header("Accept", "application/vnd.github+json")
                .header("User-Agent", "mirrorcheck");
            if let Some(token) = &self.token {
                request = request.header("Authorization", format!("token {token}"));
            }

            let error = match request.send().await {
                Ok(response) if response.status() == reqwest::StatusCode::NOT_FOUND => {
                    return Err(FetchError::NotFound);
                }
                Ok(response) if response.status() == reqwest::StatusCode::FORBIDDEN => {
                    if is_rate_limit(&response) {
                        FetchError::RateLimited
                    } else {
                        return Err(FetchError::Forbidden);
                    }
                }
                Ok(response) if response.status().is_success() => {
                    let issue: RestIssue = response
                        .json()
                        .await
                        .map_err(|err| FetchError::Malformed(err.to_string()))?;
                    return Ok(issue.into());
                }
                Ok(response) => FetchError::Network(format!("GitHub returned {}", response.status())),
                Err(err) if err.is_timeout() => FetchError::Timeout,
                Err(err) => FetchError::Network(err.to_string()),
            };

            if attempt > self.max_retries {
                return Err(error);
            }
            let wait = match error {
                FetchError::RateLimited => Duration::from_secs(5 * u64::from(attempt)),
                _ => Duration::from_secs(2),
            };
            tracing::debug!(reference = %key, attempt, error = %error, "retrying GitHub fetch");
            tokio::time::sleep(wait).await;
        }
    }
}
