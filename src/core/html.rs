// src/core/html.rs
//
// Tolerant, allocation-light HTML slicing. No DOM: we find tag blocks by
// case-insensitive search and strip markup to visible text.

use super::sanitize::{normalize_entities, normalize_ws};

/// ASCII-only lowercase. Byte offsets stay valid against the original.
pub fn to_lower(s: &str) -> String {
    s.to_ascii_lowercase()
}

/// Iterator over `<open …>…close` blocks (inclusive), e.g. every `<tr>` row.
/// Lowercases the document once instead of per lookup.
pub struct TagBlocks<'a> {
    doc: &'a str,
    lc: String,
    open: String,
    close: String,
    pos: usize,
}

impl<'a> TagBlocks<'a> {
    pub fn new(doc: &'a str, open: &str, close: &str) -> Self {
        Self {
            doc,
            lc: to_lower(doc),
            open: to_lower(open),
            close: to_lower(close),
            pos: 0,
        }
    }
}

impl<'a> Iterator for TagBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let start = self.lc.get(self.pos..)?.find(&self.open)? + self.pos;
            let name_end = start + self.open.len();

            // "<tr" must not match "<track"
            let glued = self.lc[name_end..]
                .bytes()
                .next()
                .is_some_and(|b| b.is_ascii_alphanumeric());
            if glued {
                self.pos = name_end;
                continue;
            }

            let open_end = self.lc[name_end..].find('>')? + name_end + 1;
            let end = self.lc[open_end..].find(&self.close)? + open_end + self.close.len();
            self.pos = end;
            let doc: &'a str = self.doc;
            return Some(&doc[start..end]);
        }
    }
}

pub fn tag_blocks<'a>(doc: &'a str, open: &str, close: &str) -> TagBlocks<'a> {
    TagBlocks::new(doc, open, close)
}

/// Content between the opener's `>` and the last `<` of a block.
pub fn inner_after_open_tag(block: &str) -> &str {
    match (block.find('>'), block.rfind('<')) {
        (Some(oe), Some(cs)) if cs > oe => &block[oe + 1..cs],
        _ => "",
    }
}

/// Visible text: tags become spaces (so `<td>a</td><td>b</td>` reads "a b"),
/// entities are decoded, whitespace collapsed.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => { in_tag = false; out.push(' '); }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_found_case_insensitively() {
        let doc = r#"<TABLE><TR class="a"><td>one</td></TR><tr><td>two</td></tr></TABLE>"#;
        let rows: Vec<String> = tag_blocks(doc, "<tr", "</tr>").map(strip_tags).collect();
        assert_eq!(rows, strings!["one", "two"]);
    }

    #[test]
    fn track_is_not_a_row() {
        let doc = "<track src=x><tr><td>real</td></tr>";
        let rows: Vec<&str> = tag_blocks(doc, "<tr", "</tr>").collect();
        assert_eq!(rows, vec!["<tr><td>real</td></tr>"]);
    }

    #[test]
    fn unterminated_block_stops_iteration() {
        let doc = "<tr><td>open forever";
        assert_eq!(tag_blocks(doc, "<tr", "</tr>").count(), 0);
    }

    #[test]
    fn strip_tags_separates_cells_and_decodes() {
        assert_eq!(
            strip_tags("<td>Jenna&nbsp;Lewis</td><td><b>Voted</b> Out</td>"),
            "Jenna Lewis Voted Out"
        );
    }

    #[test]
    fn inner_of_block() {
        assert_eq!(inner_after_open_tag("<title>Survivor 50</title>"), "Survivor 50");
        assert_eq!(inner_after_open_tag("no tags"), "");
    }
}
