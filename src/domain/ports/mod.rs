pub mod github_lookup;

pub use github_lookup::GitHubLookup;
