//! Reference extraction from free-form issue text.
//!
//! Matching is anchored to the GitHub URL syntax; bare numbers in
//! titles or prose never match. Pure functions of the input text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::models::{BlobSource, GitHubRef, LinearIssue, RefKey};

/// Matches `github.com/<owner>/<repo>/issues/<n>` and `/pull/<n>`,
/// with or without a scheme prefix.
static GITHUB_ISSUE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)/(?:issues|pull)/(\d+)")
        .expect("hard-coded pattern compiles")
});

/// Extract GitHub references from one text blob.
///
/// Identical references (same owner/repo/number) within the blob are
/// deduplicated, preserving first-seen order.
pub fn extract_refs(source: BlobSource, text: &str) -> Vec<GitHubRef> {
    let mut seen = HashSet::new();
    let mut refs = Vec::new();
    for caps in GITHUB_ISSUE_URL.captures_iter(text) {
        let Ok(number) = caps[3].parse::<u64>() else {
            continue;
        };
        let key = RefKey::new(&caps[1], &caps[2], number);
        if seen.insert(key.clone()) {
            refs.push(GitHubRef::new(key, source));
        }
    }
    refs
}

/// Extract references from every blob of an issue.
///
/// The same reference appearing in two different blobs is kept twice,
/// each tagged with its own source; the lookup layer deduplicates the
/// actual fetches by key.
pub fn extract_issue_refs(issue: &LinearIssue) -> Vec<GitHubRef> {
    issue
        .blobs
        .iter()
        .flat_map(|blob| extract_refs(blob.source, &blob.text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TextBlob;

    #[test]
    fn extracts_issue_and_pull_urls() {
        let text = "See https://github.com/modular/mojo/issues/5164 and \
                    https://github.com/modular/max/pull/42 for details.";
        let refs = extract_refs(BlobSource::Description, text);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].key, RefKey::new("modular", "mojo", 5164));
        assert_eq!(refs[1].key, RefKey::new("modular", "max", 42));
        assert_eq!(refs[0].source, BlobSource::Description);
    }

    #[test]
    fn ignores_bare_numbers_and_unrelated_text() {
        let text = "Fix crash in parser (#123), seen 456 times since v7.8.9. \
                    Also check https://example.com/issues/99.";
        assert!(extract_refs(BlobSource::Description, text).is_empty());
    }

    #[test]
    fn matches_scheme_less_urls() {
        let text = "mirrored at github.com/modular/mojo/issues/7";
        let refs = extract_refs(BlobSource::Description, text);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].key.number, 7);
    }

    #[test]
    fn deduplicates_within_one_blob() {
        let text = "https://github.com/a/b/issues/1 again \
                    https://github.com/a/b/issues/1 and also \
                    https://github.com/a/b/issues/2";
        let refs = extract_refs(BlobSource::Description, text);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].key.number, 1);
        assert_eq!(refs[1].key.number, 2);
    }

    #[test]
    fn n_distinct_urls_yield_n_refs() {
        let text = (1..=5)
            .map(|n| format!("https://github.com/o/r/issues/{n} padding 12345"))
            .collect::<Vec<_>>()
            .join("\n");
        let refs = extract_refs(BlobSource::Description, &text);
        assert_eq!(refs.len(), 5);
    }

    #[test]
    fn preserves_same_ref_across_blobs_with_sources() {
        let issue = LinearIssue {
            id: "lin_1".to_string(),
            identifier: "MOCO-1".to_string(),
            title: "t".to_string(),
            status: "Todo".to_string(),
            url: None,
            blobs: vec![
                TextBlob::new(BlobSource::Description, "https://github.com/a/b/issues/1"),
                TextBlob::new(BlobSource::Comment(0), "dup: https://github.com/a/b/issues/1"),
            ],
        };
        let refs = extract_issue_refs(&issue);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].key, refs[1].key);
        assert_eq!(refs[0].source, BlobSource::Description);
        assert_eq!(refs[1].source, BlobSource::Comment(0));
    }
}
