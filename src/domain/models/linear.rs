//! Linear-side domain models.
//!
//! Issues are normalized from GraphQL responses into [`LinearIssue`] and
//! are immutable once fetched. The text blobs carried on an issue are the
//! inputs to reference extraction; each blob remembers where it came from
//! so extracted references can be attributed for diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A Linear team, resolved from a human-supplied key or name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearTeam {
    /// Linear's internal team id, used for issue pagination queries.
    pub id: String,
    /// Short team key, e.g. "MOCO".
    pub key: String,
    /// Full team name, e.g. "MojoCompiler".
    pub name: String,
}

/// Where a text blob (and any reference found in it) came from.
///
/// Diagnostic context only; never participates in reference identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlobSource {
    /// The issue description body.
    Description,
    /// A Linear attachment (GitHub mirrors show up here as link attachments).
    Attachment,
    /// A comment body, by position in the fetched comment list.
    Comment(usize),
}

impl fmt::Display for BlobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobSource::Description => write!(f, "description"),
            BlobSource::Attachment => write!(f, "attachment"),
            BlobSource::Comment(idx) => write!(f, "comment #{}", idx + 1),
        }
    }
}

/// A piece of free-form text scanned for GitHub references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlob {
    pub source: BlobSource,
    pub text: String,
}

impl TextBlob {
    pub fn new(source: BlobSource, text: impl Into<String>) -> Self {
        Self { source, text: text.into() }
    }
}

/// A Linear issue, normalized for reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearIssue {
    /// Linear's internal issue id.
    pub id: String,
    /// Team-prefixed identifier, e.g. "MOCO-1233". Unique within a team.
    pub identifier: String,
    pub title: String,
    /// Workflow state name as Linear reports it (e.g. "In Progress").
    /// Matching against the expected-combination table is case-insensitive.
    pub status: String,
    pub url: Option<String>,
    /// Text blobs to scan for GitHub references.
    pub blobs: Vec<TextBlob>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_source_display() {
        assert_eq!(BlobSource::Description.to_string(), "description");
        assert_eq!(BlobSource::Attachment.to_string(), "attachment");
        assert_eq!(BlobSource::Comment(0).to_string(), "comment #1");
        assert_eq!(BlobSource::Comment(2).to_string(), "comment #3");
    }
}
