//! Stage 4: Markup extraction, HTML to plain text.
//!
//! Block-level tags become newlines and table cells become tabs; the
//! order of the passes matters, since the final tag sweep would otherwise
//! erase the structure.

use crate::entities;
use crate::scanner::{self, Case};
use regex::Regex;
use std::sync::LazyLock;

pub const TEXT_OPEN: &str = "<TEXT>";
pub const TEXT_CLOSE: &str = "</TEXT>";

static RE_BLOCK_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?:div|p|br|tr|li|h[1-6]|hr)\b[^>]*>").unwrap());
static RE_BLOCK_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(?:div|p|br|tr|li|h[1-6]|hr)\s*>").unwrap());
static RE_CELL_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</t[dh]\s*>\s*<t[dh]\b[^>]*>").unwrap());
static RE_CELL_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<t[dh]\b[^>]*>").unwrap());
static RE_CELL_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</t[dh]\s*>").unwrap());
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Extract text from a document body, preferring its `<TEXT>` block.
pub fn extract(content: &str) -> String {
    match scanner::first_block(content, TEXT_OPEN, TEXT_CLOSE, Case::Insensitive) {
        Some(block) => html_to_text(block.inner),
        None => html_to_text(content),
    }
}

/// Convert markup to plain text.
pub fn html_to_text(html: &str) -> String {
    let text = RE_BLOCK_OPEN.replace_all(html, "\n");
    let text = RE_BLOCK_CLOSE.replace_all(&text, "\n");

    let text = RE_CELL_GAP.replace_all(&text, "\t");
    let text = RE_CELL_OPEN.replace_all(&text, "");
    let text = RE_CELL_CLOSE.replace_all(&text, "\t");

    let text = strip_tags(&text);
    let text = entities::decode(&text);

    text.replace('\u{A0}', " ").replace('\u{200B}', "")
}

/// Remove every `<...>` tag without substitution.
pub fn strip_tags(text: &str) -> String {
    RE_TAG.replace_all(text, "").into_owned()
}
