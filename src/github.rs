//! Pull request lookups against GitHub.

pub mod client;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_utils;

pub use client::{FetchError, GitHubClient, PullRequest, PullRequestApi, DEFAULT_API_URL};
pub use resolver::{resolve_pull_request, Resolution};
