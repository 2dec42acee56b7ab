//! Lenient nested-tag scanner.
//!
//! Splits text into a forest of [`TagNode`]s using literal substring search and
//! a per-name depth counter instead of an XML parser. Input is pasted by hand
//! and is not guaranteed to be well formed, so the matching policy is:
//!
//! - only exact `<name>` / `</name>` pairs count, where `name` matches
//!   `[A-Za-z][A-Za-z0-9_]*` (no attributes, no self-closing tags);
//! - nesting is resolved by counting further `<name>` and `</name>` occurrences
//!   of the *same* name; other tag names do not affect the count;
//! - an opening tag with no matching close is treated as plain text.
//!
//! All delimiters are ASCII, so byte offsets produced here always fall on
//! UTF-8 character boundaries.

use toolbench_core::TagNode;

/// Wrapper tag stripped from the outside of a document before parsing.
pub const ROOT_TAG: &str = "root";

/// A direct child tag located inside a span of text.
#[derive(Debug, Clone, Copy)]
struct TagSpan<'a> {
    tag_name: &'a str,
    /// Offset of the opening `<`.
    open_start: usize,
    /// Offset just past the closing tag's `>`.
    close_end: usize,
    inner: &'a str,
}

/// Parses `text` into its top-level tagged sections.
///
/// A document that is entirely wrapped in one `<root>...</root>` pair is
/// unwrapped first. Never fails: text with no recognizable tags yields an
/// empty forest.
#[must_use]
pub fn parse_tag_tree(text: &str) -> Vec<TagNode> {
    let body = unwrap_root(text);
    direct_children(body).iter().map(build_node).collect()
}

/// Human-readable label for a tag name: underscore-separated words, each
/// capitalized (`order_retrieval_process` becomes `Order Retrieval Process`).
#[must_use]
pub fn tag_label(tag_name: &str) -> String {
    tag_name
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.as_str().to_lowercase().chars())
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strips a single enclosing `<root>` element when it spans the whole
/// (trimmed) input; otherwise returns the trimmed input.
fn unwrap_root(text: &str) -> &str {
    let trimmed = text.trim();
    let open_len = ROOT_TAG.len() + 2;
    let close_len = ROOT_TAG.len() + 3;

    if opening_tag_name(trimmed, 0) != Some(ROOT_TAG) {
        return trimmed;
    }
    match find_closing_tag(trimmed, 0, ROOT_TAG) {
        Some(close_start) if close_start + close_len == trimmed.len() => {
            trimmed[open_len..close_start].trim()
        }
        _ => trimmed,
    }
}

fn build_node(span: &TagSpan<'_>) -> TagNode {
    let nested = direct_children(span.inner);
    TagNode {
        tag_name: span.tag_name.to_string(),
        label: tag_label(span.tag_name),
        content: own_content(span.inner, &nested),
        children: nested.iter().map(build_node).collect(),
    }
}

/// Text before the first nested tag and after the last one, joined by a blank
/// line when both are present.
fn own_content(inner: &str, nested: &[TagSpan<'_>]) -> String {
    let (Some(first), Some(last)) = (nested.first(), nested.last()) else {
        return inner.trim().to_string();
    };

    let before = inner[..first.open_start].trim();
    let after = inner[last.close_end..].trim();
    [before, after]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Locates the tags at the top level of `content`, skipping over everything a
/// matched tag encloses.
fn direct_children(content: &str) -> Vec<TagSpan<'_>> {
    let mut spans = Vec::new();
    let mut pos = 0usize;

    while pos < content.len() {
        let Some(rel) = content[pos..].find('<') else {
            break;
        };
        let open_start = pos + rel;

        let Some(tag_name) = opening_tag_name(content, open_start) else {
            pos = open_start + 1;
            continue;
        };

        let Some(close_start) = find_closing_tag(content, open_start, tag_name) else {
            tracing::trace!(tag = tag_name, offset = open_start, "skipping unterminated tag");
            pos = open_start + 1;
            continue;
        };

        let close_end = close_start + tag_name.len() + 3;
        spans.push(TagSpan {
            tag_name,
            open_start,
            close_end,
            inner: &content[open_start + tag_name.len() + 2..close_start],
        });
        pos = close_end;
    }

    spans
}

/// Returns the tag name when an opening tag `<name>` begins exactly at `at`.
fn opening_tag_name(text: &str, at: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.get(at) != Some(&b'<') {
        return None;
    }

    let name_start = at + 1;
    if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }

    let name_end = bytes[name_start..]
        .iter()
        .position(|b| !(b.is_ascii_alphanumeric() || *b == b'_'))
        .map_or(bytes.len(), |rel| name_start + rel);

    (bytes.get(name_end) == Some(&b'>')).then(|| &text[name_start..name_end])
}

/// Finds the offset of the `</name>` that closes the `<name>` at `open_start`.
///
/// Every further `<name>` raises the depth and every `</name>` lowers it; the
/// close that brings the depth to zero wins. Returns `None` when the input
/// ends first.
///
/// The next open and next close positions are cached, and only the one just
/// consumed is searched again, so the scan is a single pass over `text`.
fn find_closing_tag(text: &str, open_start: usize, tag_name: &str) -> Option<usize> {
    let open = format!("<{tag_name}>");
    let close = format!("</{tag_name}>");
    let body_start = open_start + open.len();
    let mut depth = 1usize;
    let mut next_open = find_from(text, &open, body_start);
    let mut next_close = find_from(text, &close, body_start);

    loop {
        let close_at = next_close?;
        match next_open {
            Some(open_at) if open_at < close_at => {
                depth += 1;
                next_open = find_from(text, &open, open_at + open.len());
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(close_at);
                }
                next_close = find_from(text, &close, close_at + close.len());
            }
        }
    }
}

fn find_from(text: &str, needle: &str, from: usize) -> Option<usize> {
    text.get(from..)?.find(needle).map(|rel| from + rel)
}

#[cfg(test)]
#[path = "tag_tree_test.rs"]
mod tests;
