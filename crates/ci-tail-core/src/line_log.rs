//! Append-only sequence of received log lines

use ci_tail_ansi::{parse_line, ParsedLine, Severity};
use std::ops::Range;

/// One received, newline-terminated line
///
/// The raw text keeps its trailing newline, so concatenating every record
/// and the pending tail yields exactly the bytes received.
#[derive(Debug, Clone)]
pub struct LineRecord {
    raw: String,
    parsed: ParsedLine,
    summarized: bool,
}

impl LineRecord {
    fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            parsed: parse_line(raw),
            summarized: false,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn parsed(&self) -> &ParsedLine {
        &self.parsed
    }

    pub fn severity(&self) -> Severity {
        self.parsed.severity
    }

    pub fn is_notable(&self) -> bool {
        self.parsed.severity.is_notable()
    }

    /// Whether the producer ended this unit with a newline
    pub fn is_terminated(&self) -> bool {
        self.raw.ends_with('\n')
    }

    /// Whether the minimap has already looked at this line
    pub fn is_summarized(&self) -> bool {
        self.summarized
    }
}

/// Ordered, append-only line records
///
/// Records are never reordered, edited or removed; a record's index is its
/// identity. Text after the last newline waits in a tail buffer outside the
/// indexed records until its newline arrives, so indices do not depend on
/// how the producer chunked its output.
#[derive(Debug, Clone, Default)]
pub struct LineLog {
    records: Vec<LineRecord>,
    tail: String,
    bytes: usize,
}

impl LineLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a chunk into lines and append them in order
    ///
    /// The pending tail is continued by the chunk. Each `\n`-terminated
    /// piece becomes one record; a trailing piece without a newline becomes
    /// the new tail. Returns the index range of the committed records.
    pub fn append_chunk(&mut self, chunk: &str) -> Range<usize> {
        let start = self.records.len();
        self.bytes += chunk.len();
        if chunk.is_empty() {
            return start..start;
        }

        let mut pending = std::mem::take(&mut self.tail);
        pending.push_str(chunk);
        for piece in pending.split_inclusive('\n') {
            if piece.ends_with('\n') {
                self.records.push(LineRecord::new(piece));
            } else {
                self.tail.push_str(piece);
            }
        }
        start..self.records.len()
    }

    /// Received text not yet ended by a newline
    pub fn pending_tail(&self) -> Option<&str> {
        (!self.tail.is_empty()).then_some(self.tail.as_str())
    }

    /// Rows a view draws: every record plus the pending tail, if any
    pub fn row_count(&self) -> usize {
        self.records.len() + usize::from(!self.tail.is_empty())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.records.len()
    }

    pub fn get(&self, index: usize) -> Option<&LineRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineRecord> {
        self.records.iter()
    }

    /// Records in `range`, clamped to what exists
    pub fn slice(&self, range: Range<usize>) -> &[LineRecord] {
        let end = range.end.min(self.records.len());
        let start = range.start.min(end);
        &self.records[start..end]
    }

    /// Total UTF-8 bytes of received text
    pub fn byte_len(&self) -> usize {
        self.bytes
    }

    /// Everything received so far, in order
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.bytes);
        for record in &self.records {
            text.push_str(&record.raw);
        }
        text.push_str(&self.tail);
        text
    }

    /// Flag a record as summarized
    ///
    /// Returns `true` only the first time, so callers can use it to create
    /// per-line artifacts exactly once.
    pub fn mark_summarized(&mut self, index: usize) -> bool {
        match self.records.get_mut(index) {
            Some(record) if !record.summarized => {
                record.summarized = true;
                true
            }
            _ => false,
        }
    }

    pub fn notable_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_notable()).count()
    }
}
