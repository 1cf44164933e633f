//! Marks for notable lines

use crate::line_log::LineLog;
use ci_tail_ansi::Severity;
use std::ops::Range;

/// Minimap entry pointing at a notable line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollerMark {
    pub line: usize,
    pub severity: Severity,
}

/// Marks in line order, at most one per line
#[derive(Debug, Clone, Default)]
pub struct Minimap {
    marks: Vec<ScrollerMark>,
}

impl Minimap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create marks for the notable lines in `range`
    ///
    /// Every line looked at is flagged as summarized on the log, and a
    /// summarized line is skipped, so processing a line twice never
    /// duplicates its mark. Returns the number of marks added.
    pub fn sync_range(&mut self, log: &mut LineLog, range: Range<usize>) -> usize {
        let before = self.marks.len();
        for index in range {
            if !log.mark_summarized(index) {
                continue;
            }
            let Some(record) = log.get(index) else {
                continue;
            };
            if record.is_notable() {
                self.insert(ScrollerMark {
                    line: index,
                    severity: record.severity(),
                });
            }
        }
        self.marks.len() - before
    }

    fn insert(&mut self, mark: ScrollerMark) {
        match self.marks.binary_search_by_key(&mark.line, |m| m.line) {
            Ok(_) => {}
            Err(pos) => self.marks.insert(pos, mark),
        }
    }

    pub fn marks(&self) -> &[ScrollerMark] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn failures(&self) -> usize {
        self.marks
            .iter()
            .filter(|m| m.severity == Severity::Failure)
            .count()
    }

    pub fn mark_for_line(&self, line: usize) -> Option<ScrollerMark> {
        self.marks
            .binary_search_by_key(&line, |m| m.line)
            .ok()
            .map(|pos| self.marks[pos])
    }

    /// First mark strictly below `line`
    pub fn next_after(&self, line: usize) -> Option<ScrollerMark> {
        let pos = self.marks.partition_point(|m| m.line <= line);
        self.marks.get(pos).copied()
    }

    /// Last mark strictly above `line`
    pub fn prev_before(&self, line: usize) -> Option<ScrollerMark> {
        let pos = self.marks.partition_point(|m| m.line < line);
        pos.checked_sub(1).map(|p| self.marks[p])
    }
}
