// src/core/sanitize.rs

/// Decode the handful of entities the wiki actually emits in table text.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s!(s);
    }
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Byte offset of the first occurrence of `needle` in `haystack` that is not
/// glued to a letter or digit on either side. `&` also glues ("Q&A"), and so
/// does an apostrophe next to a one-letter needle ("Q's"). Both sides must
/// already share the same case.
pub fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let short = needle.chars().nth(1).is_none();
    let glued = |c: char| {
        c.is_alphanumeric() || c == '&' || (short && matches!(c, '\'' | '\u{2019}'))
    };

    let mut from = 0;
    while let Some(rel) = haystack[from..].find(needle) {
        let start = from + rel;
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !glued(c));
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !glued(c));
        if before_ok && after_ok {
            return Some(start);
        }
        // advance by one char, not one byte
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

pub fn contains_word(haystack: &str, needle: &str) -> bool {
    find_word(haystack, needle).is_some()
}
