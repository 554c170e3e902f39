//! Commit metadata read from the repository.

use chrono::{DateTime, Utc};
use git2::Commit;
use serde::{Deserialize, Serialize};

/// Commit information structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Full SHA-1 hash of the commit
    pub hash: String,
    /// Author name
    pub author: String,
    /// Committer timestamp
    pub committed_at: DateTime<Utc>,
    /// Full commit message, subject and body
    pub message: String,
    /// Number of parents; two or more for a merge
    pub parent_count: usize,
}

impl CommitInfo {
    /// Create CommitInfo from git2::Commit
    pub fn from_git_commit(commit: &Commit<'_>) -> Self {
        let when = commit.committer().when();
        let committed_at = DateTime::from_timestamp(when.seconds(), 0).unwrap_or_default();

        Self {
            hash: commit.id().to_string(),
            author: commit.author().name().unwrap_or("Unknown").to_string(),
            committed_at,
            message: commit.message().unwrap_or("").to_string(),
            parent_count: commit.parent_count(),
        }
    }

    /// First line of the message
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Whether this commit integrates another branch
    pub fn is_merge(&self) -> bool {
        self.parent_count >= 2
    }

    /// Abbreviated hash for log output
    pub fn short_hash(&self) -> &str {
        let end = self.hash.len().min(super::SHORT_HASH_LEN);
        &self.hash[..end]
    }
}
