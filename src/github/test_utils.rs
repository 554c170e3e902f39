//! Shared test utilities for the `github` module.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use chrono::DateTime;

use crate::github::{FetchError, PullRequest, PullRequestApi};

type Response = Result<PullRequest, FetchError>;

/// Mock pull request source with a pre-programmed queue of responses.
///
/// Responses are returned in FIFO order regardless of the repository asked
/// for. When the queue is exhausted, lookups return [`FetchError::NotFound`].
/// Every lookup records its `(repo, number)` pair.
pub(crate) struct MockPullRequestApi {
    responses: Mutex<VecDeque<Response>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockPullRequestApi {
    /// Creates a mock that answers with `responses` in order.
    pub(crate) fn new(responses: Vec<Response>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns a handle for inspecting lookups after the mock is borrowed away.
    pub(crate) fn call_handle(&self) -> CallHandle {
        CallHandle {
            calls: self.calls.clone(),
        }
    }
}

impl PullRequestApi for MockPullRequestApi {
    fn fetch_pull_request<'a>(
        &'a self,
        repo: &'a str,
        number: &'a str,
    ) -> Pin<Box<dyn Future<Output = Response> + Send + 'a>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((repo.to_string(), number.to_string()));
        }
        let response = self
            .responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or(Err(FetchError::NotFound));
        Box::pin(async move { response })
    }

    fn pull_request_url(&self, repo: &str, number: &str) -> String {
        format!("mock://repos/{repo}/pulls/{number}")
    }
}

/// Shared view of the lookups a [`MockPullRequestApi`] received.
#[derive(Clone)]
pub(crate) struct CallHandle {
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl CallHandle {
    /// Repositories queried, in order.
    pub(crate) fn repos(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(repo, _)| repo.clone()).collect())
            .unwrap_or_default()
    }

    /// Number of lookups made.
    pub(crate) fn count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }
}

/// A merged pull request with the given title and merge commit.
pub(crate) fn pull_request(title: &str, merge_commit_sha: &str) -> PullRequest {
    PullRequest {
        title: title.to_string(),
        body: String::new(),
        merged_at: DateTime::from_timestamp(1_650_000_000, 0),
        merge_commit_sha: Some(merge_commit_sha.to_string()),
        html_url: format!("https://github.com/org/repo/pull/{}", title.len()),
    }
}
