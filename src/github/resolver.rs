//! Matching merge commits to pull requests across repositories.

use tracing::{debug, warn};

use crate::git::CommitInfo;
use crate::github::{FetchError, PullRequest, PullRequestApi};
use crate::utils::ProgressLog;

/// Outcome of resolving one merge commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A pull request whose merge commit is the given commit.
    Found(PullRequest),
    /// No repository produced a matching pull request.
    NotFound,
    /// The API refused a request; later lookups would fail the same way.
    RateLimited,
    /// Transport, body or decode failure.
    HttpError,
}

/// Looks up pull request `number` in each repository in order.
///
/// A 404 or a pull request merged as a different commit moves on to the next
/// repository; rate limiting and HTTP failures stop the search at once.
pub async fn resolve_pull_request(
    api: &dyn PullRequestApi,
    commit: &CommitInfo,
    number: &str,
    repos: &[String],
    log: &ProgressLog,
) -> Resolution {
    for repo in repos {
        log.log(&format!("GET {}", api.pull_request_url(repo, number)));

        match api.fetch_pull_request(repo, number).await {
            Ok(pr) if pr.is_merged_as(&commit.hash) => {
                debug!(%repo, number, hash = %commit.short_hash(), "matched pull request");
                return Resolution::Found(pr);
            }
            Ok(pr) => {
                debug!(
                    %repo,
                    number,
                    expected = %commit.hash,
                    actual = pr.merge_commit_sha.as_deref().unwrap_or(""),
                    "merge commit mismatch"
                );
            }
            Err(FetchError::NotFound) => {
                debug!(%repo, number, "pull request not in repository");
            }
            Err(err @ FetchError::RateLimited(_)) => {
                warn!(%repo, number, error = %err, "rate limited");
                return Resolution::RateLimited;
            }
            Err(
                err @ (FetchError::Status(_)
                | FetchError::Transport(_)
                | FetchError::Body(_)
                | FetchError::Decode(_)),
            ) => {
                warn!(%repo, number, error = %err, "pull request lookup failed");
                return Resolution::HttpError;
            }
        }
    }

    Resolution::NotFound
}
