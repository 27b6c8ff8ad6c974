//! `mirrorcheck issue`: single-issue report.

use anyhow::Result;

use crate::cli::display::table;
use crate::domain::models::Config;

pub async fn execute(identifier: String, config: Config) -> Result<()> {
    let reconciler = super::build_reconciler(&config)?;
    let result = reconciler.reconcile_issue(&identifier).await?;
    print!("{}", table::render_issue_report(&result));
    Ok(())
}
