//! Stage 5: Character sanitization.

/// Characters removed outright.
fn is_removed(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}'
            | '\u{B}'
            | '\u{C}'
            | '\u{D}'..='\u{1F}'
            | '\u{7F}'
            | '\u{E000}'..='\u{F8FF}'
            | '\u{F0000}'..='\u{FFFFD}'
            | '\u{100000}'..='\u{10FFFD}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202F}'
            | '\u{2060}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFFE}'
            | '\u{FFFF}'
    )
}

/// Strip control, private-use and invisible characters; map Unicode line
/// and paragraph separators to newlines.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{85}' | '\u{2028}' => out.push('\n'),
            '\u{2029}' => out.push_str("\n\n"),
            c if is_removed(c) => {}
            c => out.push(c),
        }
    }
    out
}

/// True if `text` holds nothing [`sanitize`] would remove.
pub fn is_clean(text: &str) -> bool {
    !text.chars().any(|c| is_removed(c) || matches!(c, '\u{85}' | '\u{2028}' | '\u{2029}'))
}
