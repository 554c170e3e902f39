//! Body text formatting for plain-text reports.

use std::sync::LazyLock;

use regex::Regex;

/// Column the wrapped body should fit into, indent included.
pub const LINE_WIDTH: usize = 80;

/// Three backticks, optionally followed by a single language tag.
#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static FENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[\w+.-]*$").unwrap());

/// Indents and word-wraps a pull request body.
///
/// Every non-empty line is wrapped to `LINE_WIDTH - indent` columns and
/// prefixed with `indent` spaces. Lines inside a fenced code block keep
/// their content verbatim under a doubled indent; the fence markers
/// themselves are dropped. Leading whitespace of an ordinary line is kept
/// on each of its wrapped lines. Blank lines stay empty.
pub fn format_body(body: &str, indent: usize) -> String {
    let normalized = body.trim().replace("\r\n", "\n");
    let prefix = " ".repeat(indent);
    let code_prefix = " ".repeat(indent * 2);
    let width = LINE_WIDTH.saturating_sub(indent).max(1);

    let mut out: Vec<String> = Vec::new();
    let mut in_fence = false;

    for line in normalized.split('\n') {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }

        if line.trim().is_empty() {
            out.push(String::new());
            continue;
        }

        if in_fence {
            out.push(format!("{code_prefix}{line}"));
            continue;
        }

        let text = line.trim_start();
        let lead = &line[..line.len() - text.len()];
        let text_width = width.saturating_sub(lead.chars().count()).max(1);
        out.extend(
            wrap_words(text, text_width)
                .into_iter()
                .map(|wrapped| format!("{prefix}{lead}{wrapped}")),
        );
    }

    out.join("\n")
}

fn is_fence(line: &str) -> bool {
    FENCE_PATTERN.is_match(line.trim())
}

/// Greedily packs the words of `line` into lines of at most `width` columns.
///
/// A word longer than `width` gets a line of its own and is never split.
pub fn wrap_words(line: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
