//! Resolved changelog entries.

use serde::Serialize;

use crate::data::references::extract_bug_reference;
use crate::git::CommitInfo;
use crate::github::PullRequest;

/// Link template for bug references; the id is appended.
pub const BUGZILLA_URL: &str = "https://bugzilla.redhat.com/show_bug.cgi?id=";

/// Issue-tracker reference taken from a pull request title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugReference {
    /// Tracker identifier
    pub id: String,
    /// Web link to the tracker entry
    pub link: String,
}

impl BugReference {
    /// Builds a reference and its link from a tracker id.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            link: format!("{BUGZILLA_URL}{id}"),
        }
    }
}

/// A merge commit paired with the pull request that produced it.
#[derive(Debug, Clone)]
pub struct ResolvedChange {
    commit: CommitInfo,
    pull_request: PullRequest,
    bug: Option<BugReference>,
}

impl ResolvedChange {
    /// Pairs a commit with its pull request.
    ///
    /// Any bug marker is extracted here and stripped from the title.
    pub fn new(commit: CommitInfo, mut pull_request: PullRequest) -> Self {
        let (bug, title) = extract_bug_reference(&pull_request.title);
        pull_request.title = title;
        Self {
            commit,
            pull_request,
            bug,
        }
    }

    /// The merge commit.
    pub fn commit(&self) -> &CommitInfo {
        &self.commit
    }

    /// The pull request, title already rewritten.
    pub fn pull_request(&self) -> &PullRequest {
        &self.pull_request
    }

    /// The bug reference, if the title carried one.
    pub fn bug(&self) -> Option<&BugReference> {
        self.bug.as_ref()
    }

    /// Flattened view used for JSON output.
    pub fn record(&self) -> ChangeRecord<'_> {
        ChangeRecord {
            author: &self.commit.author,
            bugzilla: self.bug.as_ref().map_or("", |bug| bug.link.as_str()),
            hash: &self.commit.hash,
            pull_request_body: &self.pull_request.body,
            pull_request_title: &self.pull_request.title,
        }
    }
}

/// One element of the JSON report.
#[derive(Debug, Serialize)]
pub struct ChangeRecord<'a> {
    /// Commit author name
    pub author: &'a str,
    /// Bug link, empty when there is none
    pub bugzilla: &'a str,
    /// Commit hash
    pub hash: &'a str,
    /// Pull request body
    pub pull_request_body: &'a str,
    /// Pull request title after bug extraction
    pub pull_request_title: &'a str,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::DateTime;

    use super::*;

    pub(crate) const HASH: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

    pub(crate) fn commit() -> CommitInfo {
        CommitInfo {
            hash: HASH.to_string(),
            author: "Jane Doe".to_string(),
            committed_at: DateTime::from_timestamp(1_650_000_000, 0).unwrap_or_default(),
            message: "Merge pull request #42 from jane/fix-thing\n\nFix thing".to_string(),
            parent_count: 2,
        }
    }

    pub(crate) fn pull_request(title: &str, body: &str) -> PullRequest {
        PullRequest {
            title: title.to_string(),
            body: body.to_string(),
            merged_at: DateTime::from_timestamp(1_650_000_000, 0),
            merge_commit_sha: Some(HASH.to_string()),
            html_url: "https://github.com/org/repo/pull/42".to_string(),
        }
    }
}
