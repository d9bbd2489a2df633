//! Minimal tag scanner for conjugation pages.
//!
//! Works on byte offsets of an ASCII-lowercased copy, which keeps offsets
//! valid in the original string. Comments and `<script>`/`<style>` bodies
//! are skipped so markup-looking strings inside them are never matched.

/// A matched element: its opening tag and everything up to the matching close tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<'a> {
    pub name: &'a str,
    pub open_tag: &'a str,
    pub inner: &'a str,
}

impl<'a> Element<'a> {
    /// Whitespace-separated `class` attribute contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        attribute(self.open_tag, "class")
            .map(|value| value.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Direct children (at any depth not already inside a match) named any of `names`
    pub fn children(&self, names: &[&'a str]) -> Vec<Element<'a>> {
        elements(self.inner, names)
    }

    /// Text content with tags removed and entities decoded, untrimmed
    pub fn text(&self) -> String {
        decode_entities(&strip_tags(self.inner))
    }
}

/// Non-overlapping elements named any of `names`, in document order.
/// Once an element matches, its contents are not searched again.
pub fn elements<'a>(html: &'a str, names: &[&'a str]) -> Vec<Element<'a>> {
    let lc = html.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0;

    while let Some(rel) = lc[pos..].find('<') {
        let start = pos + rel;

        if let Some(skip_to) = skip_opaque(&lc, start) {
            pos = skip_to;
            continue;
        }

        let Some(name) = names.iter().copied().find(|n| opens_tag(&lc, start, n)) else {
            pos = start + 1;
            continue;
        };

        let Some(open_end) = lc[start..].find('>').map(|i| start + i + 1) else {
            break;
        };

        let (inner_end, close_end) = match find_close(&lc, open_end, name) {
            Some(found) => found,
            None => (html.len(), html.len()),
        };

        out.push(Element {
            name,
            open_tag: &html[start..open_end],
            inner: &html[open_end..inner_end],
        });
        pos = close_end;
    }

    out
}

/// Every element named any of `names` at any depth, in document order.
/// Unlike [`elements`], matches nested inside an earlier match are included.
pub fn all_elements<'a>(html: &'a str, names: &[&'a str]) -> Vec<Element<'a>> {
    let mut out = Vec::new();
    for element in elements(html, names) {
        out.push(element);
        out.extend(all_elements(element.inner, names));
    }
    out
}

/// Drop everything between `<` and `>`; text nodes are concatenated as-is
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Decode the handful of entities conjugation cells use
pub fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#8203;", "")
        .replace("&#x200b;", "")
        .replace("&#x200B;", "")
        .replace("&ZeroWidthSpace;", "")
        .replace('\u{200b}', "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Cell text ready for validation: markup stripped, entities decoded, trimmed
pub fn clean_cell(inner: &str) -> String {
    decode_entities(&strip_tags(inner)).trim().to_string()
}

fn opens_tag(lc: &str, at: usize, name: &str) -> bool {
    let rest = &lc[at + 1..];
    if !rest.starts_with(name) {
        return false;
    }
    matches!(
        rest.as_bytes().get(name.len()),
        Some(b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')
    )
}

fn closes_tag(lc: &str, at: usize, name: &str) -> bool {
    lc[at..].starts_with("</") && opens_tag(&lc[at + 1..], 0, name)
}

/// End of a comment or script/style block starting at `at`
fn skip_opaque(lc: &str, at: usize) -> Option<usize> {
    if lc[at..].starts_with("<!--") {
        return Some(lc[at..].find("-->").map(|i| at + i + 3).unwrap_or(lc.len()));
    }
    for raw in ["script", "style"] {
        if opens_tag(lc, at, raw) {
            let close = format!("</{raw}");
            return Some(match lc[at..].find(&close) {
                Some(i) => lc[at + i..].find('>').map(|j| at + i + j + 1).unwrap_or(lc.len()),
                None => lc.len(),
            });
        }
    }
    None
}

/// (start of closing tag, end of closing tag) for an element opened before `from`.
/// Same-named nested elements are balanced.
fn find_close(lc: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut pos = from;

    while let Some(rel) = lc[pos..].find('<') {
        let at = pos + rel;

        if let Some(skip_to) = skip_opaque(lc, at) {
            pos = skip_to;
            continue;
        }

        if closes_tag(lc, at, name) {
            let end = lc[at..].find('>').map(|i| at + i + 1).unwrap_or(lc.len());
            if depth == 0 {
                return Some((at, end));
            }
            depth -= 1;
            pos = end;
        } else if opens_tag(lc, at, name) {
            depth += 1;
            pos = at + 1;
        } else {
            pos = at + 1;
        }
    }

    None
}

fn attribute<'a>(open_tag: &'a str, attr: &str) -> Option<&'a str> {
    let lc = open_tag.to_ascii_lowercase();
    let needle = format!("{attr}=");
    let mut from = 0;

    while let Some(rel) = lc[from..].find(&needle) {
        let at = from + rel;
        let preceded_by_space = lc[..at].ends_with(|c: char| c.is_ascii_whitespace());
        let value_start = at + needle.len();
        from = value_start;

        if !preceded_by_space {
            continue;
        }

        let rest = &open_tag[value_start..];
        return match rest.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &rest[1..];
                body.find(q).map(|end| &body[..end])
            }
            Some(_) => {
                let end = rest
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                Some(&rest[..end])
            }
            None => None,
        };
    }

    None
}
