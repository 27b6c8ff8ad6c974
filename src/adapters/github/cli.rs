//! GitHub lookup via the `gh` CLI.
//!
//! Preferred backend: `gh` carries its own authentication, so no raw
//! token ever has to reach this process. `GITHUB_TOKEN` is stripped
//! from the child environment because it overrides `gh`'s stored
//! credentials when present.

use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::errors::FetchError;
use crate::domain::models::{GitHubIssueState, IssueState, RefKey};
use crate::domain::ports::GitHubLookup;

/// Default timeout for one `gh` invocation.
const GH_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GhCliLookup {
    program: String,
    max_retries: u32,
}

impl GhCliLookup {
    pub fn new(max_retries: u32) -> Self {
        Self { program: "gh".to_string(), max_retries }
    }

    /// Override the executable name, for tests.
    #[cfg(test)]
    fn with_program(program: impl Into<String>, max_retries: u32) -> Self {
        Self { program: program.into(), max_retries }
    }

    async fn run_view(&self, key: &RefKey) -> Result<Output, FetchError> {
        let repo = format!("{}/{}", key.owner, key.repo);
        let number = key.number.to_string();
        let future = tokio::process::Command::new(&self.program)
            .args([
                "issue",
                "view",
                number.as_str(),
                "--repo",
                repo.as_str(),
                "--json",
                "number,title,state,url",
            ])
            .env_remove("GITHUB_TOKEN")
            .output();

        match tokio::time::timeout(GH_TIMEOUT, future).await {
            Err(_) => Err(FetchError::Timeout),
            Ok(Err(err)) => Err(FetchError::Network(format!(
                "failed to run {}: {err}",
                self.program
            ))),
            Ok(Ok(output)) => Ok(output),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GhIssueView {
    number: u64,
    title: String,
    state: String,
    #[serde(default)]
    url: Option<String>,
}

/// Parse the JSON `gh issue view` prints on success. `gh` reports
/// states uppercase (OPEN/CLOSED), unlike the REST API.
fn parse_view_output(stdout: &[u8]) -> Result<GitHubIssueState, FetchError> {
    let view: GhIssueView = serde_json::from_slice(stdout)
        .map_err(|err| FetchError::Malformed(err.to_string()))?;
    Ok(GitHubIssueState {
        number: view.number,
        title: view.title,
        state: IssueState::from_api(&view.state),
        url: view.url,
    })
}

/// Classify a failed `gh` invocation from its exit code and stderr.
/// Exit code 22 is `gh`'s HTTP-error code, seen on rate limiting.
fn classify_failure(exit_code: Option<i32>, stderr: &str) -> FetchError {
    let stderr_lower = stderr.to_lowercase();
    if stderr_lower.contains("not found") || stderr_lower.contains("could not resolve") {
        FetchError::NotFound
    } else if stderr_lower.contains("rate limit") || exit_code == Some(22) {
        FetchError::RateLimited
    } else if stderr_lower.contains("forbidden") {
        FetchError::Forbidden
    } else {
        let detail = stderr.trim();
        if detail.is_empty() {
            FetchError::Network(format!(
                "gh exited with {}",
                exit_code.map_or_else(|| "signal".to_string(), |c| c.to_string())
            ))
        } else {
            FetchError::Network(detail.to_string())
        }
    }
}

#[async_trait]
impl GitHubLookup for GhCliLookup {
    async fn fetch_issue_state(&self, key: &RefKey) -> Result<GitHubIssueState, FetchError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let error = match self.run_view(key).await {
                Ok(output) if output.status.success() => {
                    return parse_view_output(&output.stdout);
                }
                Ok(output) => {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    match classify_failure(output.status.code(), &stderr) {
                        // Definitive answers, no point retrying.
                        err @ (FetchError::NotFound | FetchError::Forbidden) => return Err(err),
                        err => err,
                    }
                }
                // A spawn failure (gh missing) will not fix itself.
                Err(err @ FetchError::Network(_)) => return Err(err),
                Err(err) => err,
            };

            if attempt > self.max_retries {
                return Err(error);
            }
            let wait = match error {
                FetchError::RateLimited => Duration::from_secs(10 * u64::from(attempt)),
                _ => Duration::from_secs(2),
            };
            tracing::debug!(reference = %key, attempt, error = %error, "retrying gh lookup");
            tokio::time::sleep(wait).await;
        }
    }
}
