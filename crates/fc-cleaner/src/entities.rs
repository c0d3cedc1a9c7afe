//! Character-reference decoding for extracted markup text.
//!
//! Numeric references are resolved here; named references go through the
//! full HTML5 entity table, including the legacy names that may appear
//! without a semicolon as a prefix of a longer word (`&copy2024`).

use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]{1,8});?|#[xX]([0-9a-fA-F]{1,8});?|[A-Za-z][A-Za-z0-9]{0,31};?)").unwrap()
});

/// Windows-1252 characters for references in 0x80..=0x9F.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{81}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{8D}', '\u{017D}', '\u{8F}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{9D}', '\u{017E}', '\u{0178}',
];

fn numeric(code: u32) -> char {
    match code {
        0x80..=0x9F => CP1252_HIGH[(code - 0x80) as usize],
        0 => char::REPLACEMENT_CHARACTER,
        _ => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
    }
}

fn replace(caps: &Captures) -> String {
    let whole = &caps[0];
    let code = match (caps.get(1), caps.get(2)) {
        (Some(dec), _) => dec.as_str().parse::<u32>().ok(),
        (None, Some(hex)) => u32::from_str_radix(hex.as_str(), 16).ok(),
        (None, None) => return htmlize::unescape(whole).into_owned(),
    };
    code.map(|c| numeric(c).to_string()).unwrap_or_else(|| whole.to_string())
}

/// Decode named and numeric character references. Unknown names stay verbatim.
pub fn decode(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    RE_ENTITY.replace_all(text, replace).into_owned()
}
