//! Context windower - bounded excerpt around a candidate's first occurrence

/// Default number of characters kept on each side of the match
pub const DEFAULT_CONTEXT_WINDOW: usize = 150;

/// Build a bounded excerpt of `content` centered on the first occurrence of
/// `secret_value`
///
/// Returns `secret_value` unchanged when there is no content to window.
/// When the occurrence is found, the excerpt spans `window` characters on
/// each side of it, clamped to the content bounds; `...` marks each side
/// where text was omitted. When the occurrence is missing (the candidate was
/// normally extracted from this same content, but sources are not trusted on
/// that), the first `2 * window` characters are returned with a trailing
/// `...`.
///
/// This is a total function: it operates on character boundaries and never
/// fails, whatever the content.
pub fn build_context(content: &str, secret_value: &str, window: usize) -> String {
    if content.is_empty() || secret_value.is_empty() {
        return secret_value.to_string();
    }

    match content.find(secret_value) {
        Some(match_start) => {
            let match_end = match_start + secret_value.len();
            let start = back_up_chars(content, match_start, window);
            let end = advance_chars(content, match_end, window);

            let mut excerpt = String::new();
            if start > 0 {
                excerpt.push_str("...");
            }
            excerpt.push_str(&content[start..end]);
            if end < content.len() {
                excerpt.push_str("...");
            }
            excerpt
        }
        None => {
            let head: String = content.chars().take(window * 2).collect();
            format!("{}...", head)
        }
    }
}

/// Walk back `count` characters from byte index `from`
fn back_up_chars(s: &str, from: usize, count: usize) -> usize {
    let mut idx = from;
    for _ in 0..count {
        match s[..idx].char_indices().next_back() {
            Some((i, _)) => idx = i,
            None => return 0,
        }
    }
    idx
}

/// Walk forward `count` characters from byte index `from`
fn advance_chars(s: &str, from: usize, count: usize) -> usize {
    let mut idx = from;
    for _ in 0..count {
        match s[idx..].chars().next() {
            Some(c) => idx += c.len_utf8(),
            None => return s.len(),
        }
    }
    idx
}
