//! Serde models for Linear GraphQL responses, plus normalization into
//! domain types.

use serde::Deserialize;

use crate::domain::models::{BlobSource, LinearIssue, LinearTeam, TextBlob};

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Generic connection wrapper: `{ "nodes": [...] }`.
#[derive(Debug, Deserialize)]
pub struct Nodes<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct TeamsData {
    pub teams: Nodes<TeamNode>,
}

#[derive(Debug, Deserialize)]
pub struct TeamNode {
    pub id: String,
    pub name: String,
    pub key: String,
}

impl From<TeamNode> for LinearTeam {
    fn from(node: TeamNode) -> Self {
        LinearTeam { id: node.id, key: node.key, name: node.name }
    }
}

#[derive(Debug, Deserialize)]
pub struct IssuesData {
    pub issues: Nodes<IssueNode>,
}

#[derive(Debug, Deserialize)]
pub struct TeamIssuesData {
    pub team: Option<TeamIssuesNode>,
}

#[derive(Debug, Deserialize)]
pub struct TeamIssuesNode {
    pub issues: PagedIssues,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedIssues {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<IssueNode>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IssueNode {
    pub id: String,
    pub identifier: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub state: StateNode,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub attachments: Option<Nodes<AttachmentNode>>,
    #[serde(default)]
    pub comments: Option<Nodes<CommentNode>>,
}

#[derive(Debug, Deserialize)]
pub struct StateNode {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AttachmentNode {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentNode {
    pub body: String,
}

impl From<IssueNode> for LinearIssue {
    /// Normalize a GraphQL issue node, gathering every scannable text
    /// blob: description, attachment URLs and titles, comment bodies.
    fn from(node: IssueNode) -> Self {
        let mut blobs = Vec::new();

        if let Some(description) = node.description.filter(|d| !d.is_empty()) {
            blobs.push(TextBlob::new(BlobSource::Description, description));
        }

        for attachment in node.attachments.map(|a| a.nodes).unwrap_or_default() {
            let text = [attachment.url, attachment.title]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join("\n");
            if !text.is_empty() {
                blobs.push(TextBlob::new(BlobSource::Attachment, text));
            }
        }

        for (idx, comment) in node
            .comments
            .map(|c| c.nodes)
            .unwrap_or_default()
            .into_iter()
            .enumerate()
        {
            if !comment.body.is_empty() {
                blobs.push(TextBlob::new(BlobSource::Comment(idx), comment.body));
            }
        }

        LinearIssue {
            id: node.id,
            identifier: node.identifier,
            title: node.title,
            status: node.state.name,
            url: node.url,
            blobs,
        }
    }
}
