//! Low-level helpers shared by the product extractor.
//!
//! Everything here is total: a pattern that does not match yields `None`
//! rather than an error.

use std::sync::LazyLock;

use regex::Regex;

/// `<word> <number>`, e.g. `"USD 18.50"`. `\w` and `\d` are spelled out as
/// ASCII classes on purpose.
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z0-9_]+)\s+([0-9.]+)").expect("valid price regex"));

/// Grind value runs up to the next comma.
static GRIND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Grind:\s*([^,]+)").expect("valid grind regex"));

/// Size value runs to the end of the line.
static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Size:\s*(.+)").expect("valid size regex"));

/// Builds a non-greedy matcher for the first `<tag>...</tag>` pair. The body
/// may span lines.
pub(crate) fn tag_pattern(tag: &str) -> Regex {
    let tag = regex::escape(tag);
    Regex::new(&format!(r"(?s)<{tag}>(.*?)</{tag}>")).expect("valid tag regex")
}

/// Returns the trimmed first capture group of the first match of `re`.
pub(crate) fn capture_trimmed(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Splits a raw price like `"USD 18.50"` into its currency word and amount.
///
/// The amount is `None` when the digits-and-dots run holds no parseable
/// number (e.g. a lone `"."`).
pub(crate) fn parse_price(original_price: &str) -> Option<(String, Option<f64>)> {
    let cap = PRICE_RE.captures(original_price)?;
    let currency = cap.get(1)?.as_str().to_string();
    let amount = cap.get(2).and_then(|m| parse_leading_float(m.as_str()));
    Some((currency, amount))
}

/// Parses the longest numeric prefix of `s`: digits with at most one `.`.
/// Trailing garbage is ignored, so `"1.2.3"` reads as `1.2`.
pub(crate) fn parse_leading_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0usize;
    let mut has_dot = false;
    let mut has_digit = false;

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => has_digit = true,
            b'.' if !has_dot => has_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !has_digit {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

/// Splits a comma-separated tag string, trimming entries and dropping empties.
pub(crate) fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pulls `(grind, size)` out of variant details such as
/// `"Grind: Whole Bean, Size: 250g"`.
pub(crate) fn parse_variant_details(details: &str) -> (Option<String>, Option<String>) {
    (
        capture_trimmed(&GRIND_RE, details),
        capture_trimmed(&SIZE_RE, details),
    )
}
