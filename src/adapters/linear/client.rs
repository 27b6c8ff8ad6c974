//! Linear GraphQL client.
//!
//! Owns its own credential and endpoint configuration; nothing ambient.
//! Transport-level hiccups are retried with a bounded exponential
//! backoff before a [`DomainError::Transient`] surfaces.

use std::time::Duration;

use backoff::ExponentialBackoffBuilder;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{LinearConfig, LinearIssue, LinearTeam};

use super::models::{
    GraphQlResponse, IssuesData, TeamIssuesData, TeamsData,
};

/// Fields requested for every issue node.
const ISSUE_FIELDS: &str = "
    id
    identifier
    title
    description
    url
    state { name }
    attachments { nodes { url title } }
    comments { nodes { body } }
";

pub struct LinearClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
    page_size: usize,
}

impl LinearClient {
    pub fn new(config: &LinearConfig, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            token: token.into(),
            page_size: config.page_size,
        }
    }

    /// Execute one GraphQL query and deserialize the `data` payload.
    async fn query<T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> DomainResult<T> {
        let payload = serde_json::json!({ "query": query, "variables": variables });

        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(500))
            .with_max_elapsed_time(Some(Duration::from_secs(15)))
            .build();

        let response = backoff::future::retry(policy, || async {
            let response = self
                .http
                .post(&self.api_url)
                .header("Authorization", &self.token)
                .header("Content-Type", "application/json")
                .json(&payload)
                .send()
                .await
                .map_err(|err| {
                    if err.is_connect() || err.is_timeout() {
                        backoff::Error::transient(DomainError::Transient(err.to_string()))
                    } else {
                        backoff::Error::permanent(DomainError::Api(err.to_string()))
                    }
                })?;

            if response.status().is_server_error() {
                return Err(backoff::Error::transient(DomainError::Transient(format!(
                    "Linear API returned {}",
                    response.status()
                ))));
            }
            Ok(response)
        })
        .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DomainError::Auth(
                "Linear rejected the API token. Check LINEAR_API_TOKEN (https://linear.app/settings/api)"
                    .to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Api(format!("Linear API returned {status}: {body}")));
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|err| DomainError::Api(format!("Linear response parse failed: {err}")))?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> =
                envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(DomainError::Api(messages.join("; ")));
        }

        envelope
            .data
            .ok_or_else(|| DomainError::Api("Linear response had no data".to_string()))
    }

    /// Fetch a single issue by identifier (e.g. "MOCO-1233").
    ///
    /// # Errors
    ///
    /// `InvalidIdentifier` if the identifier is malformed,
    /// `IssueNotFound` if it resolves to nothing.
    pub async fn fetch_issue(&self, identifier: &str) -> DomainResult<LinearIssue> {
        let (team_key, number) = parse_identifier(identifier)?;

        let query = format!(
            "query IssueByIdentifier($filter: IssueFilter!) {{
                issues(filter: $filter) {{ nodes {{ {ISSUE_FIELDS} }} }}
            }}"
        );
        let variables = serde_json::json!({
            "filter": {
                "number": { "eq": number },
                "team": { "key": { "eq": team_key } }
            }
        });

        let data: IssuesData = self.query(&query, variables).await?;
        data.issues
            .nodes
            .into_iter()
            .next()
            .map(LinearIssue::from)
            .ok_or_else(|| DomainError::IssueNotFound(identifier.to_string()))
    }

    /// List every team visible to the token.
    pub async fn list_teams(&self) -> DomainResult<Vec<LinearTeam>> {
        let query = "query { teams { nodes { id name key } } }";
        let data: TeamsData = self.query(query, serde_json::json!({})).await?;
        Ok(data.teams.nodes.into_iter().map(LinearTeam::from).collect())
    }

    /// Resolve a human-supplied team key or name.
    ///
    /// # Errors
    ///
    /// `TeamNotFound` listing every known team if nothing matches.
    pub async fn resolve_team(&self, selector: &str) -> DomainResult<LinearTeam> {
        let teams = self.list_teams().await?;
        resolve_team_match(&teams, selector).ok_or_else(|| DomainError::TeamNotFound {
            selector: selector.to_string(),
            known: teams
                .iter()
                .map(|team| format!("{} ({})", team.key, team.name))
                .collect(),
        })
    }

    /// Fetch a team's issues page by page, stopping as soon as `limit`
    /// is satisfied without requesting further pages.
    pub async fn fetch_team_issues(
        &self,
        team_id: &str,
        limit: Option<usize>,
    ) -> DomainResult<Vec<LinearIssue>> {
        let query = format!(
            "query TeamIssues($teamId: String!, $first: Int!, $cursor: String) {{
                team(id: $teamId) {{
                    issues(first: $first, after: $cursor) {{
                        nodes {{ {ISSUE_FIELDS} }}
                        pageInfo {{ hasNextPage endCursor }}
                    }}
                }}
            }}"
        );

        let mut issues: Vec<LinearIssue> = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let first = next_page_size(self.page_size, limit, issues.len());
            if first == 0 {
                break;
            }

            let variables = serde_json::json!({
                "teamId": team_id,
                "first": first,
                "cursor": cursor,
            });
            let data: TeamIssuesData = self.query(&query, variables).await?;
            let page = data
                .team
                .ok_or_else(|| DomainError::Api(format!("team {team_id} not visible")))?
                .issues;

            issues.extend(page.nodes.into_iter().map(LinearIssue::from));
            tracing::debug!(total = issues.len(), "fetched issue page");

            if limit.is_some_and(|l| issues.len() >= l) || !page.page_info.has_next_page {
                break;
            }
            cursor = page.page_info.end_cursor;
        }

        if let Some(l) = limit {
            issues.truncate(l);
        }
        Ok(issues)
    }
}

/// Split "TEAM-123" into ("TEAM", 123).
pub(crate) fn parse_identifier(identifier: &str) -> DomainResult<(String, u64)> {
    let (key, number) = identifier
        .rsplit_once('-')
        .ok_or_else(|| DomainError::InvalidIdentifier(identifier.to_string()))?;
    if key.is_empty() {
        return Err(DomainError::InvalidIdentifier(identifier.to_string()));
    }
    let number = number
        .parse::<u64>()
        .map_err(|_| DomainError::InvalidIdentifier(identifier.to_string()))?;
    Ok((key.to_uppercase(), number))
}

/// How many issues to request next, honoring an optional overall limit.
fn next_page_size(page_size: usize, limit: Option<usize>, collected: usize) -> usize {
    match limit {
        Some(l) => page_size.min(l.saturating_sub(collected)),
        None => page_size,
    }
}

/// Resolve a selector against the known teams: exact key match first,
/// then exact name (both case-insensitive), then a unique prefix match,
/// then a unique substring match on key or name.
fn resolve_team_match(teams: &[LinearTeam], selector: &str) -> Option<LinearTeam> {
    let wanted = selector.to_lowercase();

    if let Some(team) = teams.iter().find(|t| t.key.to_lowercase() == wanted) {
        return Some(team.clone());
    }
    if let Some(team) = teams.iter().find(|t| t.name.to_lowercase() == wanted) {
        return Some(team.clone());
    }

    let prefix: Vec<&LinearTeam> = teams
        .iter()
        .filter(|t| {
            t.key.to_lowercase().starts_with(&wanted) || t.name.to_lowercase().starts_with(&wanted)
        })
        .collect();
    if let [team] = prefix[..] {
        return Some(team.clone());
    }

    let substring: Vec<&LinearTeam> = teams
        .iter()
        .filter(|t| {
            t.key.to_lowercase().contains(&wanted) || t.name.to_lowercase().contains(&wanted)
        })
        .collect();
    if let [team] = substring[..] {
        return Some(team.clone());
    }

    None
}
