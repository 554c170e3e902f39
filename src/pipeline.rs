//! Changelog generation: walk history, resolve pull requests, render.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::data::{extract_pull_request_number, render, OutputFormat, ResolvedChange};
use crate::error::{ChangelogError, Result};
use crate::git::{GitRepository, WalkOptions, HEAD};
use crate::github::{
    resolve_pull_request, GitHubClient, PullRequestApi, Resolution, DEFAULT_API_URL,
};
use crate::utils::credentials::DEFAULT_CONFIG_PATH;
use crate::utils::{Credentials, ProgressLog};

/// Default boundary revision for the walk.
pub const DEFAULT_END_REF: &str = "HEAD~1";

/// Default body indentation in spaces.
pub const DEFAULT_INDENT: usize = 8;

/// Run configuration, fixed for the whole run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Repository working directory
    pub repo_path: PathBuf,
    /// Revision to start from
    pub start_ref: String,
    /// Revision to stop before; empty for none
    pub end_ref: String,
    /// First repository to look pull requests up in, `owner/name`
    pub upstream_repo: String,
    /// Fallback repository, `owner/name`
    pub downstream_repo: String,
    /// Stop after the first merge older than this
    pub since: Option<DateTime<Utc>>,
    /// Body indentation in spaces
    pub indent: usize,
    /// Report format
    pub output_format: OutputFormat,
    /// Credentials file
    pub config_path: PathBuf,
    /// API base URL
    pub api_url: String,
    /// Progress notices
    pub log: ProgressLog,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            repo_path: PathBuf::from("."),
            start_ref: HEAD.to_string(),
            end_ref: DEFAULT_END_REF.to_string(),
            upstream_repo: String::new(),
            downstream_repo: String::new(),
            since: None,
            indent: DEFAULT_INDENT,
            output_format: OutputFormat::Plain,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            api_url: DEFAULT_API_URL.to_string(),
            log: ProgressLog::silent(),
        }
    }
}

impl Options {
    /// Repositories to query, upstream first, skipping empty ones.
    pub fn repositories(&self) -> Vec<String> {
        [&self.upstream_repo, &self.downstream_repo]
            .into_iter()
            .filter(|repo| !repo.is_empty())
            .cloned()
            .collect()
    }

    /// Checks that at least one repository was given.
    pub fn validate(&self) -> Result<()> {
        if self.upstream_repo.is_empty() && self.downstream_repo.is_empty() {
            return Err(ChangelogError::NoRepositories);
        }
        Ok(())
    }

    /// History walk settings.
    pub fn walk_options(&self) -> WalkOptions {
        let options = WalkOptions::default()
            .from(&self.start_ref)
            .until_ref(&self.end_ref);
        match self.since {
            Some(since) => options.since(since),
            None => options,
        }
    }
}

/// Produces the report against the live GitHub API.
pub async fn run(options: &Options) -> Result<String> {
    options.validate()?;
    let credentials = Credentials::load_from_path(&options.config_path)?;
    let client = GitHubClient::new(&options.api_url, credentials)?;
    generate(options, &client).await
}

/// Produces the report using the given pull request source.
pub async fn generate(options: &Options, api: &dyn PullRequestApi) -> Result<String> {
    let changes = collect_changes(options, api).await?;
    info!(count = changes.len(), output = %options.output_format, "rendering report");
    render(&changes, options.output_format, options.indent)
}

/// Resolves every pull request merge in the walked history.
///
/// The first lookup failure aborts the run and discards what was resolved.
pub async fn collect_changes(
    options: &Options,
    api: &dyn PullRequestApi,
) -> Result<Vec<ResolvedChange>> {
    options.validate()?;

    if !options.repo_path.exists() {
        return Err(ChangelogError::PathNotFound {
            path: options.repo_path.display().to_string(),
        });
    }

    let commits = GitRepository::open_at(&options.repo_path)?
        .merge_commits(&options.walk_options(), &options.log)?;
    let repos = options.repositories();

    let mut changes = Vec::new();

    for commit in commits {
        options.log.log(&format!("parsing commit {}", commit.hash));

        let Some(number) = extract_pull_request_number(commit.subject()) else {
            debug!(hash = %commit.short_hash(), "not a pull request merge");
            continue;
        };

        let resolution = resolve_pull_request(api, &commit, &number, &repos, &options.log).await;
        let pull_request = match resolution {
            Resolution::Found(pr) => pr,
            Resolution::RateLimited => return Err(ChangelogError::RateLimited),
            Resolution::HttpError => return Err(ChangelogError::Http),
            Resolution::NotFound => {
                return Err(ChangelogError::PullRequestNotFound {
                    number,
                    hash: commit.hash,
                })
            }
        };

        changes.push(ResolvedChange::new(commit, pull_request));
    }

    Ok(changes)
}
