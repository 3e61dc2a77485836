//! Token-level text helpers shared by the string, stylesheet and template rules.

/// Check whether a byte can be part of a selector or identifier token.
///
/// Dashes count as token bytes so that `mat-input` never matches inside
/// `mat-input-container`.
pub fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'$'
}

/// Find all byte offsets where `token` occurs in `text` as a whole token.
///
/// A match must be delimited on both sides by the start/end of `text` or by a
/// byte that cannot be part of a token. Matches never overlap.
pub fn find_token_matches(text: &str, token: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let token_len = token.len();
    let mut matches = Vec::new();

    if token_len == 0 || token_len > bytes.len() {
        return matches;
    }

    // Skipping a rejected match must land on a char boundary
    let step = token.chars().next().map_or(1, char::len_utf8);
    let mut start = 0;
    while let Some(pos) = text[start..].find(token) {
        let abs = start + pos;
        let end = abs + token_len;

        let left_ok = abs == 0 || !is_token_byte(bytes[abs - 1]);
        let right_ok = end >= bytes.len() || !is_token_byte(bytes[end]);

        if left_ok && right_ok {
            matches.push(abs);
            start = end;
        } else {
            start = abs + step;
        }
    }

    matches
}

/// Split a whitespace separated class list, returning `(offset, class)` pairs.
pub fn split_class_list(text: &str) -> Vec<(usize, &str)> {
    let mut classes = Vec::new();
    let mut current: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(start) = current.take() {
                classes.push((start, &text[start..idx]));
            }
        } else if current.is_none() {
            current = Some(idx);
        }
    }
    if let Some(start) = current {
        classes.push((start, &text[start..]));
    }

    classes
}

/// Remove one layer of matching quotes (`'`, `"` or `` ` ``) from a literal.
///
/// Returns `None` when the text is not a complete quoted literal.
pub fn strip_quotes(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let first = bytes[0];
    let last = bytes[bytes.len() - 1];
    if first == last && matches!(first, b'\'' | b'"' | b'`') {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}
