//! GitHub REST client for pull request lookups.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::{ChangelogError, Result};
use crate::utils::Credentials;

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const GITHUB_JSON: &str = "application/vnd.github.v3+json";

/// A pull request as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Title
    pub title: String,
    /// Description, empty when the API returns none
    pub body: String,
    /// When the pull request was merged, if it was
    pub merged_at: Option<DateTime<Utc>>,
    /// Commit produced by the merge
    pub merge_commit_sha: Option<String>,
    /// Web page of the pull request
    pub html_url: String,
}

impl PullRequest {
    /// Whether this pull request produced the given commit.
    pub fn is_merged_as(&self, hash: &str) -> bool {
        self.merge_commit_sha.as_deref() == Some(hash)
    }
}

/// Wire shape of `GET /repos/{repo}/pulls/{number}`.
#[derive(Deserialize)]
struct PullRequestPayload {
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    merge_commit_sha: Option<String>,
    #[serde(default)]
    html_url: String,
}

impl From<PullRequestPayload> for PullRequest {
    fn from(payload: PullRequestPayload) -> Self {
        Self {
            title: payload.title,
            body: payload.body.unwrap_or_default(),
            merged_at: payload.merged_at,
            merge_commit_sha: payload.merge_commit_sha,
            html_url: payload.html_url,
        }
    }
}

/// Raw outcome of a single failed lookup.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The repository has no pull request with that number.
    #[error("pull request not found")]
    NotFound,

    /// The API refused the request (401, 403 or 429).
    #[error("rate limited (HTTP {0})")]
    RateLimited(u16),

    /// Any other non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The request could not be sent.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The response body was not a pull request.
    #[error("failed to decode pull request: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of pull requests, keyed by repository and number.
pub trait PullRequestApi: Send + Sync {
    /// Fetches one pull request.
    fn fetch_pull_request<'a>(
        &'a self,
        repo: &'a str,
        number: &'a str,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<PullRequest, FetchError>> + Send + 'a>>;

    /// URL the lookup for `repo`/`number` goes to.
    fn pull_request_url(&self, repo: &str, number: &str) -> String;
}

/// GitHub REST API client.
pub struct GitHubClient {
    client: Client,
    api_url: String,
    credentials: Credentials,
}

impl GitHubClient {
    /// Creates a client against `api_url` using the given credentials.
    pub fn new(api_url: &str, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("git-recent-changes/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ChangelogError::HttpClient)?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Issues a single `GET` for the pull request and classifies the outcome.
    async fn fetch(
        &self,
        repo: &str,
        number: &str,
    ) -> std::result::Result<PullRequest, FetchError> {
        let url = self.pull_request_url(repo, number);

        let mut request = self.client.get(&url).header(ACCEPT, GITHUB_JSON);
        if !self.credentials.is_empty() {
            request = request.basic_auth(&self.credentials.username, Some(&self.credentials.token));
        }

        let response = request.send().await.map_err(FetchError::Transport)?;
        let status = response.status();
        debug!(%url, status = status.as_u16(), "pull request lookup");

        match status {
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                return Err(FetchError::RateLimited(status.as_u16()));
            }
            s if !s.is_success() => return Err(FetchError::Status(s.as_u16())),
            _ => {}
        }

        let body = response.bytes().await.map_err(FetchError::Body)?;
        let payload: PullRequestPayload = serde_json::from_slice(&body)?;
        Ok(payload.into())
    }
}

impl PullRequestApi for GitHubClient {
    fn fetch_pull_request<'a>(
        &'a self,
        repo: &'a str,
        number: &'a str,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<PullRequest, FetchError>> + Send + 'a>>
    {
        Box::pin(self.fetch(repo, number))
    }

    fn pull_request_url(&self, repo: &str, number: &str) -> String {
        format!("{}/repos/{repo}/pulls/{number}", self.api_url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SHA: &str = "e83c5163316f89bfbde7d9ab23ca2e25604af290";

    fn payload() -> serde_json::Value {
        serde_json::json!({
            "title": "Bug 42: Fix the frobnicator",
            "body": "Longer description",
            "merged_at": "2022-03-01T12:00:00Z",
            "merge_commit_sha": SHA,
            "html_url": "https://github.com/org/repo/pull/7",
            "number": 7
        })
    }

    fn client(server: &MockServer, credentials: Credentials) -> GitHubClient {
        GitHubClient::new(&server.uri(), credentials).unwrap()
    }

    #[test]
    fn url_joins_repo_and_number() {
        let client = GitHubClient::new("https://api.github.com/", Credentials::default()).unwrap();
        assert_eq!(
            client.pull_request_url("org/repo", "7"),
            "https://api.github.com/repos/org/repo/pulls/7"
        );
    }

    #[tokio::test]
    async fn decodes_pull_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/org/repo/pulls/7"))
            .and(header("accept", GITHUB_JSON))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload()))
            .expect(1)
            .mount(&server)
            .await;

        let pr = client(&server, Credentials::default())
            .fetch_pull_request("org/repo", "7")
            .await
            .unwrap();

        assert_eq!(pr.title, "Bug 42: Fix the frobnicator");
        assert_eq!(pr.body, "Longer description");
        assert_eq!(pr.html_url, "https://github.com/org/repo/pull/7");
        assert!(pr.is_merged_as(SHA));
        assert!(pr.merged_at.is_some());
    }

    #[tokio::test]
    async fn null_fields_are_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/org/repo/pulls/8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "title": "Draft",
                "body": null,
                "merged_at": null,
                "merge_commit_sha": null,
                "html_url": "https://github.com/org/repo/pull/8"
            })))
            .mount(&server)
            .await;

        let pr = client(&server, Credentials::default())
            .fetch_pull_request("org/repo", "8")
            .await
            .unwrap();

        assert_eq!(pr.body, "");
        assert!(pr.merged_at.is_none());
        assert!(!pr.is_merged_as(SHA));
    }

    #[tokio::test]
    async fn sends_basic_auth_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload()))
            .expect(1)
            .mount(&server)
            .await;

        let credentials = Credentials {
            username: "octocat".to_string(),
            token: "secret".to_string(),
        };
        let result = client(&server, credentials)
            .fetch_pull_request("org/repo", "7")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn classifies_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server, Credentials::default())
            .fetch_pull_request("org/repo", "7")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::NotFound));
    }

    #[tokio::test]
    async fn classifies_rate_limit_statuses() {
        for status in [401u16, 403, 429] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let err = client(&server, Credentials::default())
                .fetch_pull_request("org/repo", "7")
                .await
                .unwrap_err();

            assert!(matches!(err, FetchError::RateLimited(s) if s == status));
        }
    }

    #[tokio::test]
    async fn classifies_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = client(&server, Credentials::default())
            .fetch_pull_request("org/repo", "7")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status(502)));
    }

    #[tokio::test]
    async fn classifies_malformed_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client(&server, Credentials::default())
            .fetch_pull_request("org/repo", "7")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn classifies_unreachable_host() {
        let err = GitHubClient::new("http://127.0.0.1:1", Credentials::default())
            .unwrap()
            .fetch_pull_request("org/repo", "7")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
    }
}
