//! GitHub lookup backends.
//!
//! Two implementations of [`GitHubLookup`]: a delegate that shells out
//! to the pre-authenticated `gh` CLI (preferred, the default), and a
//! direct REST client for environments without `gh`.

pub mod cli;
pub mod rest;

use std::sync::Arc;

pub use cli::GhCliLookup;
pub use rest::GitHubRestLookup;

use crate::domain::models::{GitHubBackend, GitHubConfig};
use crate::domain::ports::GitHubLookup;

/// Construct the configured backend.
///
/// Token requirements are not checked here: the REST backend warns
/// about a missing token lazily, on its first call, and the CLI
/// backend never needs one.
pub fn select_backend(config: &GitHubConfig, token: Option<String>) -> Arc<dyn GitHubLookup> {
    match config.backend {
        GitHubBackend::Cli => Arc::new(GhCliLookup::new(config.max_retries)),
        GitHubBackend::Rest => {
            Arc::new(GitHubRestLookup::new(&config.api_url, token, config.max_retries))
        }
    }
}
