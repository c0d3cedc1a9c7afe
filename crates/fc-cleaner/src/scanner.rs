//! Linear marker scanner for SGML-style structural blocks.
//!
//! Every search moves strictly forward, so extracting all blocks of a
//! buffer is bounded by its length times the marker length.

/// How marker bytes are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Sensitive,
    /// ASCII letters compare case-insensitively.
    Insensitive,
}

/// Byte offset of the first `needle` at or after `from`.
///
/// `needle` must be ASCII, which keeps returned offsets on char boundaries.
pub fn find_marker(haystack: &str, needle: &str, from: usize, case: Case) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    match case {
        Case::Sensitive => haystack[from..].find(needle).map(|i| i + from),
        Case::Insensitive => {
            let hay = haystack.as_bytes();
            let pat = needle.as_bytes();
            if pat.is_empty() {
                return Some(from);
            }
            if hay.len() < pat.len() {
                return None;
            }
            (from..=hay.len() - pat.len()).find(|&i| hay[i..i + pat.len()].eq_ignore_ascii_case(pat))
        }
    }
}

/// Location of one `open ... close` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Offset of the opening marker.
    pub start: usize,
    /// Offset just past the closing marker.
    pub end: usize,
    /// Text between the markers.
    pub inner: &'a str,
}

/// First block bounded by `open` and the nearest following `close`.
pub fn first_block<'a>(text: &'a str, open: &str, close: &str, case: Case) -> Option<Block<'a>> {
    next_block(text, open, close, 0, case)
}

/// All non-overlapping blocks in source order. An opening marker with no
/// closing marker after it ends the scan.
pub fn all_blocks<'a>(text: &'a str, open: &str, close: &str, case: Case) -> Vec<Block<'a>> {
    let mut blocks = Vec::new();
    let mut pos = 0;
    while let Some(block) = next_block(text, open, close, pos, case) {
        pos = block.end;
        blocks.push(block);
    }
    blocks
}

fn next_block<'a>(text: &'a str, open: &str, close: &str, from: usize, case: Case) -> Option<Block<'a>> {
    let start = find_marker(text, open, from, case)?;
    let inner_start = start + open.len();
    let close_at = find_marker(text, close, inner_start, case)?;
    Some(Block {
        start,
        end: close_at + close.len(),
        inner: &text[inner_start..close_at],
    })
}

/// Value following the first `tag` whose value is non-blank. The value runs
/// up to the next `<` or newline and is trimmed.
pub fn field_value(text: &str, tag: &str) -> Option<String> {
    let mut pos = 0;
    while let Some(at) = find_marker(text, tag, pos, Case::Sensitive) {
        let value_start = at + tag.len();
        let rest = &text[value_start..];
        let value_end = rest.find(['<', '\n']).unwrap_or(rest.len());
        let value = rest[..value_end].trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
        pos = value_start;
    }
    None
}
