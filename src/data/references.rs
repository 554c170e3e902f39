//! Pull request and bug references embedded in commit subjects and titles.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::BugReference;

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static PULL_REQUEST_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Merge pull request #(\d+)").unwrap());

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static BUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Bug (\d+):").unwrap());

/// Returns the pull request number from a merge commit subject.
///
/// `None` means the commit is not a pull request merge and should be skipped.
pub fn extract_pull_request_number(subject: &str) -> Option<String> {
    PULL_REQUEST_PATTERN
        .captures(subject)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Pulls a `Bug <id>:` marker out of a pull request title.
///
/// Returns the reference, if any, and the title with every occurrence of the
/// matched marker removed. Surrounding whitespace is left alone.
pub fn extract_bug_reference(title: &str) -> (Option<BugReference>, String) {
    let Some(caps) = BUG_PATTERN.captures(title) else {
        return (None, title.to_string());
    };

    let (Some(marker), Some(id)) = (caps.get(0), caps.get(1)) else {
        return (None, title.to_string());
    };

    let rewritten = title.replace(marker.as_str(), "");
    (Some(BugReference::new(id.as_str())), rewritten)
}
