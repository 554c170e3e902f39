//! Git repository access.

pub mod commit;
pub mod history;

pub use commit::CommitInfo;
pub use history::{GitRepository, WalkOptions};

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;

/// Revision token that names the repository's current HEAD.
pub const HEAD: &str = "HEAD";
