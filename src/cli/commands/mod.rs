pub mod issue;
pub mod team;

use crate::adapters::github;
use crate::adapters::linear::LinearClient;
use crate::domain::models::Config;
use crate::infrastructure::config::ApiTokens;
use crate::services::Reconciler;

/// Wire a reconciler from config and environment tokens.
///
/// # Errors
///
/// Fails with the auth error if the Linear token is missing.
pub(crate) fn build_reconciler(config: &Config) -> anyhow::Result<Reconciler> {
    let tokens = ApiTokens::from_env();
    let linear_token = tokens.require_linear()?;
    let linear = LinearClient::new(&config.linear, linear_token);
    let lookup = github::select_backend(&config.github, tokens.github.clone());
    Ok(Reconciler::new(linear, lookup, config.github.max_concurrency))
}
