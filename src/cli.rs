//! CLI interface for git-recent-changes.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;

use crate::data::OutputFormat;
use crate::github::DEFAULT_API_URL;
use crate::pipeline::{self, Options, DEFAULT_END_REF, DEFAULT_INDENT};
use crate::utils::credentials::DEFAULT_CONFIG_PATH;
use crate::utils::ProgressLog;

/// git-recent-changes: list recently merged pull requests.
#[derive(Parser, Debug)]
#[command(name = "git-recent-changes")]
#[command(
    about = "Builds a changelog from the merged pull requests in a git repository",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Where should we start?
    #[arg(long, default_value = crate::git::HEAD)]
    pub start_ref: String,

    /// Where should we stop? Pass an empty value to walk the whole history.
    #[arg(long, default_value = DEFAULT_END_REF)]
    pub end_ref: String,

    /// Repository checked first for each pull request (owner/name).
    #[arg(long, default_value = "")]
    pub upstream_repo: String,

    /// Repository checked when upstream has no match (owner/name).
    #[arg(long, default_value = "")]
    pub downstream_repo: String,

    /// Directory where the git repository is found.
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// Output format: plain or json.
    #[arg(short = 'o', long, default_value = "plain")]
    pub output_format: String,

    /// Stop after the first merge older than this date, e.g. 2021-03-21.
    #[arg(long)]
    pub since: Option<String>,

    /// How many spaces to indent?
    #[arg(short, long, default_value_t = DEFAULT_INDENT)]
    pub indent: usize,

    /// Path to a config file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Base URL of the GitHub API.
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Show extra output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds run options, rejecting bad dates and formats before any work.
    pub fn options(&self) -> Result<Options> {
        let since = self.since.as_deref().map(parse_since).transpose()?;
        let output_format: OutputFormat = self.output_format.parse()?;

        Ok(Options {
            repo_path: self.dir.clone(),
            start_ref: self.start_ref.clone(),
            end_ref: self.end_ref.clone(),
            upstream_repo: self.upstream_repo.clone(),
            downstream_repo: self.downstream_repo.clone(),
            since,
            indent: self.indent,
            output_format,
            config_path: self.config.clone(),
            api_url: self.api_url.clone(),
            log: if self.verbose {
                ProgressLog::verbose()
            } else {
                ProgressLog::silent()
            },
        })
    }

    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        let options = self.options()?;
        let report = pipeline::run(&options).await?;
        print!("{report}");
        Ok(())
    }
}

/// Parses a `YYYY-MM-DD` date as midnight UTC.
fn parse_since(value: &str) -> Result<DateTime<Utc>> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            anyhow!("Failed to parse 'since' date. Please make sure to use '2021-02-28'.")
        })
}
