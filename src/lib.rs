//! # git-recent-changes
//!
//! Builds a "recent changes" digest from the merge history of a git
//! repository. Each `Merge pull request #N` commit is matched to its pull
//! request on GitHub, looked up first in an upstream and then in a downstream
//! repository, and rendered as plain text or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use git_recent_changes::pipeline::{self, Options};
//!
//! # async fn demo() -> git_recent_changes::error::Result<()> {
//! let options = Options {
//!     upstream_repo: "openshift/installer".to_string(),
//!     end_ref: String::new(),
//!     ..Options::default()
//! };
//! let report = pipeline::run(&options).await?;
//! print!("{report}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod data;
pub mod error;
pub mod git;
pub mod github;
pub mod pipeline;
pub mod utils;

pub use crate::cli::Cli;
pub use crate::error::ChangelogError;
pub use crate::pipeline::Options;

/// The current version of git-recent-changes.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
