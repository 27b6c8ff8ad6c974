//! mirrorcheck - Linear / GitHub mirror reconciliation
//!
//! Fetches Linear issues, extracts GitHub cross-references embedded in
//! their text, resolves each reference's state through a bounded
//! concurrent fan-out, and classifies every pairing against a fixed
//! expected-combination table.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, error taxonomy, and the
//!   GitHub lookup port
//! - **Service Layer** (`services`): reference extraction, batch
//!   lookup fan-out, classification, run orchestration
//! - **Adapters** (`adapters`): Linear GraphQL client and the two
//!   GitHub lookup backends (gh CLI delegate, REST)
//! - **Infrastructure Layer** (`infrastructure`): configuration
//! - **CLI Layer** (`cli`): command-line interface and report rendering

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult, FetchError};
pub use domain::models::{
    BlobSource, Classification, Config, GitHubBackend, GitHubIssueState, GitHubRef, IssueState,
    LinearIssue, LinearTeam, MatchResult, RefKey, TeamReport,
};
pub use domain::ports::GitHubLookup;
pub use infrastructure::config::{ApiTokens, ConfigError, ConfigLoader};
pub use services::{classify, fetch_many, Reconciler};
