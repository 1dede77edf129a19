use std::path::Path;

use crate::error::Error;
use crate::patterns::{SEPARATOR_RE, is_canonical_id};
use crate::types::RawArticle;

/// Records collected so far plus the one still accepting lines.
struct Accumulator {
    /// Record opened by the most recent separator.
    current: Option<RawArticle>,
    /// Records already closed by a later separator.
    records: Vec<RawArticle>,
}

impl Accumulator {
    /// Close the current record, if any, and return everything collected.
    fn finish(mut self) -> Vec<RawArticle> {
        if let Some(record) = self.current.take() {
            self.records.push(record);
        }
        return self.records;
    }

    /// Append a line to the open record. Lines before the first separator are dropped.
    fn push_line(&mut self, line: &str) {
        if let Some(record) = self.current.as_mut() {
            record.lines.push(line.to_string());
        }
    }

    /// Close the current record and open a new one.
    fn start(&mut self, record: RawArticle) {
        if let Some(previous) = self.current.replace(record) {
            self.records.push(previous);
        }
    }
}

/// Split one source file into raw article records, in file order.
///
/// # Errors
///
/// Returns `Error::InvalidId` if a separator token is not a canonical id.
pub fn split(source: &Path, content: &str) -> Result<Vec<RawArticle>, Error> {
    let mut acc = Accumulator {
        current: None,
        records: Vec::new(),
    };

    for (idx, line) in content.lines().enumerate() {
        let line_no = u32::try_from(idx.saturating_add(1)).unwrap_or(u32::MAX);
        let Some(token) = SEPARATOR_RE.captures(line).and_then(|c| return c.get(1)) else {
            acc.push_line(line);
            continue;
        };

        let token = token.as_str();
        if !is_canonical_id(token) {
            return Err(Error::InvalidId {
                file: source.to_path_buf(),
                line: line_no,
                token: token.to_string(),
            });
        }

        acc.start(RawArticle {
            id: token.to_string(),
            line: line_no,
            lines: Vec::new(),
            source: source.to_path_buf(),
        });
    }

    return Ok(acc.finish());
}
