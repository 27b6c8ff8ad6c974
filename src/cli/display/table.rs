//! Console table output built on comfy-table.

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};

use crate::domain::models::{IssueState, MatchResult, RunStats};

/// Maximum characters shown for titles before truncation.
const TITLE_WIDTH: usize = 40;

/// Format a single-issue report: issue header plus one line per linked
/// GitHub issue.
pub fn render_issue_report(result: &MatchResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Linear issue:   {}\n", result.issue.identifier));
    out.push_str(&format!("Title:          {}\n", result.issue.title));
    out.push_str(&format!("Status:         {}\n", result.issue.status));
    out.push_str(&format!("Classification: {}\n", result.classification));

    if result.links.is_empty() {
        out.push_str("\nNo GitHub issues linked\n");
        return out;
    }

    out.push_str("\nLinked GitHub issues:\n");
    for link in &result.links {
        let state = &link.state;
        if state.state == IssueState::Unknown {
            out.push_str(&format!(
                "  - {} (from {}): state unknown, fetch failed\n",
                link.reference.key, link.reference.source
            ));
        } else {
            out.push_str(&format!(
                "  - {} (from {}): {}, {}\n",
                link.reference.key,
                link.reference.source,
                state.state,
                truncate(&state.title, TITLE_WIDTH)
            ));
        }
    }
    out
}

/// Format the bulk report as a table: one row per (issue, link) pair,
/// a single row with placeholders for unlinked issues.
pub fn render_team_table(results: &[&MatchResult]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Linear ID").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Linear Title").add_attribute(Attribute::Bold),
            Cell::new("GitHub").add_attribute(Attribute::Bold),
            Cell::new("GH State").add_attribute(Attribute::Bold),
            Cell::new("GH Title").add_attribute(Attribute::Bold),
            Cell::new("Result").add_attribute(Attribute::Bold),
        ]);

    for result in results {
        for row in result_rows(result) {
            table.add_row(row);
        }
    }
    table
}

/// Summary footer for a bulk run.
pub fn render_summary(stats: &RunStats, shown: usize) -> String {
    format!(
        "Issues processed: {} | with GitHub links: {} | fetch failures: {} | shown: {}",
        stats.issues_processed, stats.issues_with_links, stats.fetch_failures, shown
    )
}

/// Rows for one result, shared with the markdown exporter.
pub(crate) fn result_rows(result: &MatchResult) -> Vec<Vec<String>> {
    let issue = &result.issue;
    let classification = result.classification.to_string();

    if result.links.is_empty() {
        return vec![vec![
            issue.identifier.clone(),
            issue.status.clone(),
            truncate(&issue.title, TITLE_WIDTH),
            "-".to_string(),
            "-".to_string(),
            "-".to_string(),
            classification,
        ]];
    }

    result
        .links
        .iter()
        .map(|link| {
            vec![
                issue.identifier.clone(),
                issue.status.clone(),
                truncate(&issue.title, TITLE_WIDTH),
                link.reference.key.to_string(),
                link.state.state.to_string(),
                truncate(&link.state.title, TITLE_WIDTH),
                classification.clone(),
            ]
        })
        .collect()
}

/// Truncate to `max_len` characters, appending "..." if truncated.
/// Operates on characters, not bytes, so multi-byte text is safe.
pub(crate) fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len.saturating_sub(3)).collect();
    format!("{cut}...")
}
