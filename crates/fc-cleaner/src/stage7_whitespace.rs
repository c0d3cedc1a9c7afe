//! Stage 7: Whitespace normalization. Idempotent.

use regex::Regex;
use std::sync::LazyLock;

static RE_RUN_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Collapse space/tab runs, trim every line, keep at most
/// `max_blank_lines` consecutive blank lines.
pub fn normalize(text: &str, max_blank_lines: usize) -> String {
    let collapsed = RE_RUN_SPACE.replace_all(text, " ");
    let mut result = Vec::new();
    let mut blank_run = 0;

    for line in collapsed.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            blank_run += 1;
            if blank_run <= max_blank_lines {
                result.push(line);
            }
        } else {
            blank_run = 0;
            result.push(line);
        }
    }
    result.join("\n")
}

/// Longest run of consecutive blank lines in `text`.
pub fn max_blank_run(text: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for line in text.split('\n') {
        if line.trim().is_empty() {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}
