//! Stage 1: Binary stripping of uuencoded blocks and long base64 runs.
//!
//! Runs on the whole archive before any markup parsing, since encoded
//! payloads can contain characters that confuse tag matching.

use fc_core::config::BinaryConfig;
use tracing::debug;

/// Line prefixes that end a uuencoded block without being consumed.
const BOUNDARY_MARKERS: &[&str] = &["</TEXT>", "</DOCUMENT>", "<TEXT>", "<DOCUMENT>"];

/// Apply both sweeps.
pub fn strip(text: &str, config: &BinaryConfig) -> String {
    let result = strip_uuencoded(text, &config.uuencode_placeholder);
    strip_base64(&result, config.min_base64_run, &config.base64_placeholder)
}

/// `begin NNN name` at the start of a line.
pub fn is_begin_line(line: &str) -> bool {
    let Some(rest) = line.trim_end_matches('\n').strip_prefix("begin ") else {
        return false;
    };
    let bytes = rest.as_bytes();
    bytes.len() > 4
        && bytes[..3].iter().all(u8::is_ascii_digit)
        && bytes[3] == b' '
        && !rest[4..].trim().is_empty()
}

fn is_boundary(line: &str) -> bool {
    BOUNDARY_MARKERS.iter().any(|m| line.starts_with(m))
}

/// Where a candidate block stops.
enum BlockEnd {
    /// Block covers lines up to (excluding) this index.
    At(usize),
    /// A blank line at this index broke the run; not a block.
    Broken(usize),
}

fn scan_block(lines: &[&str], begin: usize) -> BlockEnd {
    for (j, line) in lines.iter().enumerate().skip(begin + 1) {
        let body = line.trim_end_matches('\n');
        if body == "end" {
            return BlockEnd::At(j + 1);
        }
        if is_boundary(body) {
            return BlockEnd::At(j);
        }
        if body.is_empty() {
            return BlockEnd::Broken(j);
        }
    }
    // truncated block, runs to end of input
    BlockEnd::At(lines.len())
}

/// Replace each uuencoded block with a placeholder line.
///
/// A block runs from its `begin` line to a bare `end` line (removed with the
/// block), to the next structural marker line (kept), or to end of input.
pub fn strip_uuencoded(text: &str, placeholder: &str) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut out = String::with_capacity(text.len());
    let mut removed = 0usize;
    let mut i = 0;

    while i < lines.len() {
        if !is_begin_line(lines[i]) {
            out.push_str(lines[i]);
            i += 1;
            continue;
        }
        match scan_block(&lines, i) {
            BlockEnd::At(next) => {
                removed += 1;
                out.push_str(placeholder);
                out.push('\n');
                i = next;
            }
            BlockEnd::Broken(blank) => {
                // any later begin line before `blank` would break at the same line
                for line in &lines[i..=blank] {
                    out.push_str(line);
                }
                i = blank + 1;
            }
        }
    }

    if removed > 0 {
        debug!(blocks = removed, "removed uuencoded blocks");
    }
    out
}

fn is_base64_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=' | b'\n')
}

/// Replace base64 runs of at least `min_run` characters that sit directly
/// between `>` and `<`. The delimiters stay.
pub fn strip_base64(text: &str, min_run: usize, placeholder: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut removed = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'>' {
            i += 1;
            continue;
        }
        let start = i + 1;
        let mut j = start;
        while j < bytes.len() && is_base64_byte(bytes[j]) {
            j += 1;
        }
        if j < bytes.len() && bytes[j] == b'<' && j - start >= min_run {
            out.push_str(&text[copied..start]);
            out.push_str(placeholder);
            copied = j;
            removed += 1;
        }
        i = j.max(start);
    }
    out.push_str(&text[copied..]);

    if removed > 0 {
        debug!(runs = removed, "removed base64 runs");
    }
    out
}
