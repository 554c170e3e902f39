//! Report rendering.

use std::fmt;
use std::str::FromStr;

use crate::data::{ChangeRecord, ResolvedChange};
use crate::error::{ChangelogError, Result};
use crate::utils::text::format_body;

/// Output format of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text blocks.
    #[default]
    Plain,
    /// Pretty-printed JSON array.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            other => Err(ChangelogError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("plain"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Renders changes in traversal order.
pub fn render(changes: &[ResolvedChange], format: OutputFormat, indent: usize) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(render_plain(changes, indent)),
        OutputFormat::Json => render_json(changes),
    }
}

/// Renders every change as a text block, each followed by a blank line.
pub fn render_plain(changes: &[ResolvedChange], indent: usize) -> String {
    changes
        .iter()
        .map(|change| format!("{}\n", plain_block(change, indent)))
        .collect()
}

/// Renders a JSON array with two-space indentation.
pub fn render_json(changes: &[ResolvedChange]) -> Result<String> {
    let records: Vec<ChangeRecord<'_>> = changes.iter().map(ResolvedChange::record).collect();
    let mut output = serde_json::to_string_pretty(&records)?;
    output.push('\n');
    Ok(output)
}

/// Text block for one change: title, links, then the formatted body.
pub fn plain_block(change: &ResolvedChange, indent: usize) -> String {
    let prefix = " ".repeat(indent);
    let pr = change.pull_request();

    let mut block = String::new();
    block.push_str(&pr.title);
    block.push_str("\n\n");
    block.push_str(&format!("{prefix}PR: {}\n", pr.html_url));
    if let Some(bug) = change.bug() {
        block.push_str(&format!("{prefix}BZ: {}\n", bug.link));
    }

    if !pr.body.is_empty() {
        block.push('\n');
        block.push_str(&format_body(&pr.body, indent));
        block.push('\n');
    }

    block.push('\n');
    block
}
