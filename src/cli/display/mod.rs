//! Report rendering: console tables and markdown export.

pub mod markdown;
pub mod table;

use crate::domain::models::{Classification, MatchResult};

/// Default output policy: surface only mismatches and unlinked issues;
/// `show_all` additionally includes expected matches. Filtering is a
/// rendering concern; classification upstream is always complete.
pub fn filter_results(results: &[MatchResult], show_all: bool) -> Vec<&MatchResult> {
    results
        .iter()
        .filter(|result| show_all || result.classification != Classification::MatchExpected)
        .collect()
}
