//! Changelog entries and their rendering.

pub mod change;
pub mod references;
pub mod report;

pub use change::{BugReference, ChangeRecord, ResolvedChange};
pub use references::{extract_bug_reference, extract_pull_request_number};
pub use report::{render, OutputFormat};
