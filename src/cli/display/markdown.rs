//! Markdown export of the bulk report.

use chrono::Utc;

use crate::domain::models::{MatchResult, TeamReport};

use super::table::result_rows;

const HEADERS: [&str; 7] = [
    "Linear ID",
    "Status",
    "Linear Title",
    "GitHub",
    "GH State",
    "GH Title",
    "Result",
];

/// Render the team report as a standalone markdown document.
///
/// `shown` is the already-filtered result set; the summary still
/// reflects the whole run.
pub fn render_markdown(report: &TeamReport, shown: &[&MatchResult], show_all: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# Linear / GitHub status report: {} ({})\n\n",
        report.team.key, report.team.name
    ));
    out.push_str(&format!(
        "Generated: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));
    if !show_all {
        out.push_str("Showing mismatches and unlinked issues only.\n\n");
    }

    out.push_str(&format!("| {} |\n", HEADERS.join(" | ")));
    out.push_str(&format!("|{}\n", " --- |".repeat(HEADERS.len())));
    for result in shown {
        for row in result_rows(result) {
            let cells: Vec<String> = row.iter().map(|cell| escape_cell(cell)).collect();
            out.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
    }

    out.push_str(&format!(
        "\nIssues processed: {}  \nIssues with GitHub links: {}  \nFetch failures: {}\n",
        report.stats.issues_processed,
        report.stats.issues_with_links,
        report.stats.fetch_failures
    ));
    out
}

/// Pipes and newlines would break the table layout.
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        Classification, LinearIssue, LinearTeam, RunStats,
    };

    fn report() -> TeamReport {
        TeamReport {
            team: LinearTeam {
                id: "t1".to_string(),
                key: "MOCO".to_string(),
                name: "MojoCompiler".to_string(),
            },
            results: vec![MatchResult {
                issue: LinearIssue {
                    id: "lin_1".to_string(),
                    identifier: "MOCO-1".to_string(),
                    title: "A | piped title".to_string(),
                    status: "Done".to_string(),
                    url: None,
                    blobs: Vec::new(),
                },
                links: Vec::new(),
                classification: Classification::NoGithubLink,
            }],
            stats: RunStats { issues_processed: 1, issues_with_links: 0, fetch_failures: 0 },
        }
    }

    #[test]
    fn renders_document_with_table_and_summary() {
        let report = report();
        let shown: Vec<&MatchResult> = report.results.iter().collect();
        let doc = render_markdown(&report, &shown, false);
        assert!(doc.starts_with("# Linear / GitHub status report: MOCO"));
        assert!(doc.contains("| Linear ID |"));
        assert!(doc.contains("no-github-link"));
        assert!(doc.contains("Issues processed: 1"));
        assert!(doc.contains("mismatches and unlinked issues only"));
    }

    #[test]
    fn escapes_pipes_in_titles() {
        let report = report();
        let shown: Vec<&MatchResult> = report.results.iter().collect();
        let doc = render_markdown(&report, &shown, true);
        assert!(doc.contains("A \\| piped title"));
        assert!(!doc.contains("mismatches and unlinked issues only"));
    }
}
