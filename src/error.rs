//! Error types for changelog generation.

use thiserror::Error;

/// Errors that abort a changelog run.
///
/// Every failure is fatal to the run; nothing is retried and no partial
/// report is produced.
#[derive(Error, Debug)]
pub enum ChangelogError {
    /// Neither an upstream nor a downstream repository was given.
    #[error("at least one repository must be specified")]
    NoRepositories,

    /// The requested output format is not known.
    #[error("unknown output format: {0}")]
    UnsupportedFormat(String),

    /// The repository directory does not exist.
    #[error("Path {path} doesn't exist")]
    PathNotFound {
        /// The path that was checked
        path: String,
    },

    /// A start or end revision could not be resolved.
    #[error("Invalid revision: {reference}")]
    RevisionNotFound {
        /// The revision expression that failed to resolve
        reference: String,
        /// Underlying git error
        #[source]
        source: git2::Error,
    },

    /// Opening or walking the repository failed.
    #[error("Git error: {0}")]
    Repository(#[from] git2::Error),

    /// The code-hosting API refused our requests.
    #[error("unlikely to succeed because github is rate limiting our requests")]
    RateLimited,

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// A lookup failed in transport, while reading the body, or while decoding it.
    #[error("failed to get a response from github")]
    Http,

    /// No repository holds a pull request whose merge commit matches.
    #[error("pull request #{number} not found for commit {hash}")]
    PullRequestNotFound {
        /// Pull request number taken from the commit subject
        number: String,
        /// Hash of the merge commit
        hash: String,
    },

    /// The credentials file exists but could not be read.
    #[error("Failed to load credentials: {0}")]
    Credentials(#[from] config::ConfigError),

    /// JSON rendering failed.
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ChangelogError>;
