//! Byte offset into a growing log

use ci_tail_client::LogChunk;
use std::fmt;

/// Offset of the first byte not yet received
///
/// Only moves forward, and only by the raw byte length of a non-empty
/// chunk. Its value always equals the total number of bytes received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteCursor(u64);

impl ByteCursor {
    pub fn new(offset: u64) -> Self {
        Self(offset)
    }

    pub fn offset(&self) -> u64 {
        self.0
    }

    /// Account for a received chunk
    ///
    /// Returns `false` and leaves the cursor where it was when the chunk is
    /// empty.
    pub fn advance(&mut self, chunk: &LogChunk) -> bool {
        if chunk.is_empty() {
            return false;
        }
        self.0 = self.0.saturating_add(chunk.byte_length);
        true
    }
}

impl fmt::Display for ByteCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chunk(output: &str, byte_length: u64) -> LogChunk {
        LogChunk {
            output: output.to_string(),
            byte_length,
        }
    }

    #[test]
    fn test_empty_chunk_keeps_offset() {
        let mut cursor = ByteCursor::new(12);
        assert!(!cursor.advance(&LogChunk::default()));
        assert_eq!(cursor.offset(), 12);
    }

    #[test]
    fn test_advance_by_raw_length() {
        // Rendered text is longer than the raw bytes it came from
        let mut cursor = ByteCursor::default();
        assert!(cursor.advance(&chunk("a &lt; b\n", 6)));
        assert_eq!(cursor.offset(), 6);
    }

    #[test]
    fn test_monotonic() {
        let mut cursor = ByteCursor::default();
        let mut previous = cursor;
        for c in [chunk("abc", 3), LogChunk::default(), chunk("def", 3)] {
            let moved = cursor.advance(&c);
            assert!(cursor >= previous);
            assert_eq!(moved, cursor != previous);
            previous = cursor;
        }
        assert_eq!(cursor.to_string(), "6");
    }
}
