//! Selected line state machine

use crate::fragment::LineFragment;

/// Which line is selected, if any
///
/// A selection may name a line that has not streamed in yet; it stays
/// [`Selection::Pending`] until that line exists. Only a resolved selection
/// is focused, so at most one line is ever focused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    /// Requested through a fragment, line not received yet
    Pending(usize),
    /// Line exists and is focused
    Resolved(usize),
}

impl Selection {
    /// The focused line
    pub fn focused(&self) -> Option<usize> {
        match self {
            Self::Resolved(line) => Some(*line),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<usize> {
        match self {
            Self::Pending(line) => Some(*line),
            _ => None,
        }
    }

    /// Fragment that describes this selection
    pub fn fragment(&self) -> Option<LineFragment> {
        match self {
            Self::None => None,
            Self::Pending(line) | Self::Resolved(line) => Some(LineFragment::new(*line)),
        }
    }

    /// Focus a line the user clicked
    ///
    /// Replaces anything pending, so a late line cannot take focus away.
    pub fn click(&mut self, line: usize) {
        *self = Self::Resolved(line);
    }

    /// Request a line by reference
    ///
    /// Resolves immediately when `line < line_count`, otherwise waits. A
    /// newer request always replaces an older one. Returns the line to
    /// focus now, if any.
    pub fn request(&mut self, line: usize, line_count: usize) -> Option<usize> {
        *self = Self::Pending(line);
        self.resolve_pending(line_count)
    }

    /// Re-attempt a pending request after lines were appended
    ///
    /// Returns the line that just became focused. Fires once per request.
    pub fn resolve_pending(&mut self, line_count: usize) -> Option<usize> {
        match *self {
            Self::Pending(line) if line < line_count => {
                *self = Self::Resolved(line);
                Some(line)
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_existing_line_resolves() {
        let mut selection = Selection::default();
        assert_eq!(selection.request(2, 3), Some(2));
        assert_eq!(selection, Selection::Resolved(2));
    }

    #[test]
    fn test_request_missing_line_waits() {
        let mut selection = Selection::default();
        assert_eq!(selection.request(5, 3), None);
        assert_eq!(selection.pending(), Some(5));
        assert_eq!(selection.focused(), None);
        assert_eq!(selection.fragment(), Some(LineFragment::new(5)));

        assert_eq!(selection.resolve_pending(5), None);
        assert_eq!(selection.resolve_pending(6), Some(5));
        // Applied once, then dropped
        assert_eq!(selection.resolve_pending(10), None);
        assert_eq!(selection.focused(), Some(5));
    }

    #[test]
    fn test_newer_request_supersedes() {
        let mut selection = Selection::default();
        selection.request(10, 0);
        selection.request(20, 0);
        assert_eq!(selection.resolve_pending(15), None);
        assert_eq!(selection.resolve_pending(21), Some(20));
    }

    #[test]
    fn test_click_drops_pending() {
        let mut selection = Selection::default();
        selection.request(10, 4);
        selection.click(3);
        assert_eq!(selection.resolve_pending(11), None);
        assert_eq!(selection.focused(), Some(3));
    }

    #[test]
    fn test_clear() {
        let mut selection = Selection::Resolved(1);
        selection.clear();
        assert_eq!(selection.fragment(), None);
    }
}
