//! Cached regex patterns for source records and inline markup.
//!
//! Compiled once on first use through `LazyLock`.

use std::sync::LazyLock;

use regex::Regex;

/// Record separator: three or more `*`, optional whitespace, then a token.
/// A bare run of asterisks (a markdown thematic break) is not a separator.
pub static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"^\*{3,}\s*([^*\s].*?)\s*$").expect("valid regex");
});

/// Header field: `key: value`, key made of lowercase letters and underscores.
pub static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"^([a-z_]+):\s*(.*)$").expect("valid regex");
});

/// Canonical article id: lowercase alphanumerics and inner hyphens.
pub static CANONICAL_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").expect("valid regex");
});

/// `[[Term]]`: emphasis only, never a link.
pub static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"\[\[([^\[\]]+)\]\]").expect("valid regex");
});

/// `[Term]` with the restricted character class. Group 2 captures a directly
/// following `(`, which disqualifies the span as a bare reference.
pub static BARE_REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"\[([^\[\]()0-9,;]+)\](\()?").expect("valid regex");
});

/// `[label](target)`.
pub static EXPLICIT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"\[([^\[\]]+)\]\(([^()]+)\)").expect("valid regex");
});

/// Whether `token` is a valid canonical article or chapter id.
pub fn is_canonical_id(token: &str) -> bool {
    return CANONICAL_ID_RE.is_match(token);
}

/// Lowercase a token and squeeze everything else into single hyphens.
/// The result is canonical unless it is empty.
pub fn suggest_id(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for c in token.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    if out.ends_with('-') {
        out.pop();
    }
    return out;
}
