//! Merge-commit history traversal.

use std::path::Path;

use chrono::{DateTime, Utc};
use git2::{Oid, Repository, Sort};
use tracing::debug;

use crate::error::{ChangelogError, Result};
use crate::git::{CommitInfo, HEAD};
use crate::utils::ProgressLog;

/// Configuration for walking merge commits
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Revision to start from; `HEAD` means the current head
    pub start_ref: String,
    /// Revision to stop at, exclusive; empty for no boundary
    pub end_ref: String,
    /// Stop after the first merge committed before this instant
    pub since: Option<DateTime<Utc>>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            start_ref: HEAD.to_string(),
            end_ref: String::new(),
            since: None,
        }
    }
}

impl WalkOptions {
    /// Set the starting reference
    #[must_use]
    pub fn from(mut self, reference: &str) -> Self {
        self.start_ref = reference.to_string();
        self
    }

    /// Set the boundary reference
    #[must_use]
    pub fn until_ref(mut self, reference: &str) -> Self {
        self.end_ref = reference.to_string();
        self
    }

    /// Set the time cutoff
    #[must_use]
    pub fn since(mut self, date: DateTime<Utc>) -> Self {
        self.since = Some(date);
        self
    }
}

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open repository at specified path
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path)?;
        Ok(Self { repo })
    }

    /// Resolves a revision expression to a commit id.
    ///
    /// `HEAD` resolves through the repository's head reference; anything else
    /// goes through git's revision syntax (`main`, `v1.0`, `HEAD~3`, a hash).
    pub fn resolve_revision(&self, reference: &str) -> Result<Oid> {
        if reference == HEAD {
            let head = self.repo.head()?.peel_to_commit()?;
            return Ok(head.id());
        }

        self.repo
            .revparse_single(reference)
            .and_then(|object| object.peel_to_commit())
            .map(|commit| commit.id())
            .map_err(|source| ChangelogError::RevisionNotFound {
                reference: reference.to_string(),
                source,
            })
    }

    /// Walks merge commits newest-first by committer time.
    ///
    /// The walk stops before the end revision, and stops after emitting the
    /// first merge older than `since`. Non-merge commits are skipped without
    /// being checked against the cutoff.
    pub fn merge_commits(&self, options: &WalkOptions, log: &ProgressLog) -> Result<Vec<CommitInfo>> {
        log.log("find commits");

        let start = self.resolve_revision(&options.start_ref)?;
        let end = if options.end_ref.is_empty() {
            None
        } else {
            Some(self.resolve_revision(&options.end_ref)?)
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push(start)?;

        let mut commits = Vec::new();

        for oid in revwalk {
            let oid = oid?;

            if end == Some(oid) {
                debug!(%oid, "reached end revision");
                break;
            }

            let commit = self.repo.find_commit(oid)?;
            if commit.parent_count() < 2 {
                continue;
            }

            let info = CommitInfo::from_git_commit(&commit);
            log.log(&format!("adding {}", info.hash));

            let crossed_cutoff = options.since.is_some_and(|since| info.committed_at < since);
            commits.push(info);

            if crossed_cutoff {
                debug!(%oid, "crossed since cutoff");
                break;
            }
        }

        debug!(count = commits.len(), "collected merge commits");
        Ok(commits)
    }
}
