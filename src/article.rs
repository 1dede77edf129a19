use std::collections::BTreeSet;

use crate::error::Error;
use crate::patterns::HEADER_RE;
use crate::types::{Article, RawArticle};

/// Header fields gathered before the body starts.
#[derive(Default)]
struct Header {
    /// Set only by the literal value `true`.
    draft: bool,
    /// Declared synonyms, trimmed, in declaration order.
    synonyms: Vec<String>,
    /// Value of the `title` field, if present.
    title: Option<String>,
}

impl Header {
    /// Record one `key: value` pair.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedField` for unknown keys.
    fn apply(&mut self, raw: &RawArticle, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "draft" => self.draft = value == "true",
            "synonyms" => self.synonyms.extend(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| return !s.is_empty())
                    .map(String::from),
            ),
            "title" => self.title = Some(value.to_string()),
            _ => {
                return Err(Error::UnsupportedField {
                    article: raw.id.clone(),
                    field: key.to_string(),
                    file: raw.source.clone(),
                    line: raw.line,
                });
            },
        }
        return Ok(());
    }
}

/// Parse a raw record into an article: header fields, ids, unresolved body.
///
/// Leading `key: value` lines form the header. The first line that does not
/// match, and everything after it, is the body.
///
/// # Errors
///
/// Returns `Error::UnsupportedField` for an unknown header key, or
/// `Error::MissingTitle` if no non-empty `title` was declared.
pub fn parse(mut raw: RawArticle) -> Result<Article, Error> {
    let body_start = raw
        .lines
        .iter()
        .position(|line| return !HEADER_RE.is_match(line))
        .unwrap_or(raw.lines.len());
    let body = raw.lines.split_off(body_start);

    let mut header = Header::default();
    for line in &raw.lines {
        let Some(caps) = HEADER_RE.captures(line) else {
            continue;
        };
        let key = caps.get(1).map_or("", |m| return m.as_str());
        let value = caps.get(2).map_or("", |m| return m.as_str().trim());
        header.apply(&raw, key, value)?;
    }

    let title = match header.title {
        Some(t) if !t.is_empty() => t,
        Some(_) | None => {
            return Err(Error::MissingTitle {
                article: raw.id,
                file: raw.source,
                line: raw.line,
            });
        },
    };

    let mut ids = BTreeSet::new();
    ids.insert(raw.id.clone());
    ids.insert(title.to_lowercase());
    ids.extend(header.synonyms.iter().map(|s| return s.to_lowercase()));

    return Ok(Article {
        body,
        draft: header.draft,
        ids,
        main_id: raw.id,
        source: raw.source,
        title,
    });
}
