//! Text normalizer applied to every block of page text before scoring.

/// Upper bound on normalized text, to keep the optimize payload small.
pub const MAX_TEXT_CHARS: usize = 5000;

/// Normalizes with the default [`MAX_TEXT_CHARS`] cap.
pub fn normalize(raw: &str) -> String {
    normalize_with_cap(raw, MAX_TEXT_CHARS)
}

/// Collapses whitespace and truncates to at most `cap` characters.
///
/// A whitespace run becomes a single `\n` when it contains a line break and a
/// single space otherwise, so blank lines never survive. The result is trimmed
/// on both ends, after truncation as well.
pub fn normalize_with_cap(raw: &str, cap: usize) -> String {
    let mut out = String::with_capacity(raw.len().min(cap * 4));
    let mut pending: Option<char> = None;

    for c in raw.trim().chars() {
        if c.is_whitespace() {
            let is_break = matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}');
            pending = match pending {
                Some('\n') => Some('\n'),
                _ if is_break => Some('\n'),
                _ => Some(' '),
            };
            continue;
        }
        if let Some(ws) = pending.take() {
            out.push(ws);
        }
        out.push(c);
    }

    match out.char_indices().nth(cap) {
        Some((byte_idx, _)) => {
            out.truncate(byte_idx);
            out.trim_end().to_string()
        }
        None => out,
    }
}
