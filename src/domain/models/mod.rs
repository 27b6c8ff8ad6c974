pub mod config;
pub mod github;
pub mod linear;
pub mod report;

pub use config::{Config, GitHubBackend, GitHubConfig, LinearConfig, LoggingConfig};
pub use github::{GitHubIssueState, GitHubRef, IssueState, RefKey};
pub use linear::{BlobSource, LinearIssue, LinearTeam, TextBlob};
pub use report::{Classification, MatchResult, ResolvedRef, RunStats, TeamReport};
