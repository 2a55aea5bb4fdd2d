//! Char-safe string helpers shared by enrichment and the feed.
//!
//! All lengths here count Unicode scalar values, so a limit never splits
//! a multi-byte character (emoji tags are common in pitch text).

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Number of chars in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The longest prefix of `s` that is at most `max` chars long.
pub fn take_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Fit `s` into `limit` chars: text that is too long keeps its first
/// `limit - 3` chars followed by `...`.
pub fn ellipsize(s: &str, limit: usize) -> String {
    if char_len(s) > limit {
        let keep = limit.saturating_sub(ELLIPSIS.len());
        format!("{}{}", take_chars(s, keep), ELLIPSIS)
    } else {
        s.to_string()
    }
}

/// First sentence of `s`: everything before the first `.`, `!` or `?`, trimmed.
pub fn first_sentence(s: &str) -> &str {
    s.split(['.', '!', '?']).next().unwrap_or("").trim()
}
