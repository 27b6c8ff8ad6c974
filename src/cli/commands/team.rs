//! `mirrorcheck team`: bulk team report.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::display::{filter_results, markdown, table};
use crate::domain::models::Config;

pub async fn execute(
    selector: String,
    show_all: bool,
    stop_after: Option<usize>,
    export: Option<PathBuf>,
    config: Config,
) -> Result<()> {
    let reconciler = super::build_reconciler(&config)?;
    let report = reconciler.reconcile_team(&selector, stop_after).await?;

    let shown = filter_results(&report.results, show_all);

    if shown.is_empty() {
        println!("Nothing to report: all {} issues look in sync.", report.stats.issues_processed);
    } else {
        println!("{}", table::render_team_table(&shown));
    }
    println!("{}", table::render_summary(&report.stats, shown.len()));

    if let Some(path) = export {
        let document = markdown::render_markdown(&report, &shown, show_all);
        std::fs::write(&path, document)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::info!(path = %path.display(), "markdown report exported");
    }

    Ok(())
}
