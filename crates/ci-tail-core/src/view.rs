//! Render and scroll synchronizer for one open log

use crate::fragment::LineFragment;
use crate::line_log::LineLog;
use crate::minimap::{Minimap, ScrollerMark};
use crate::selection::Selection;
use crate::viewport::Viewport;
use std::ops::Range;

/// What the viewport did in response to an append
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// User scrolled away; position kept
    Unchanged,
    /// Followed the log to its new bottom
    FollowedToBottom,
    /// A pending selection arrived and was scrolled to
    ResolvedSelection(usize),
}

/// Result of [`LogView::on_chunk`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendReport {
    pub appended: Range<usize>,
    pub new_marks: usize,
    pub scroll: ScrollOutcome,
}

/// Session state for one log being viewed
///
/// Owns the received lines, the viewport, the selection and the minimap.
/// Every `on_*` method handles one event to completion, so chunks, scrolls
/// and fragment changes may arrive in any order.
#[derive(Debug, Clone, Default)]
pub struct LogView {
    log: LineLog,
    viewport: Viewport,
    selection: Selection,
    minimap: Minimap,
}

impl LogView {
    pub fn new(height: usize) -> Self {
        Self {
            viewport: Viewport::new(height),
            ..Self::default()
        }
    }

    /// Fresh session restoring a shared or remembered selection
    pub fn with_fragment(height: usize, fragment: Option<LineFragment>) -> Self {
        let mut view = Self::new(height);
        view.on_fragment_changed(fragment);
        view
    }

    pub fn log(&self) -> &LineLog {
        &self.log
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn minimap(&self) -> &Minimap {
        &self.minimap
    }

    pub fn focused_line(&self) -> Option<usize> {
        self.selection.focused()
    }

    /// Current `#line<N>` fragment, if a line is selected or requested
    pub fn fragment(&self) -> Option<LineFragment> {
        self.selection.fragment()
    }

    /// Append newly fetched text
    ///
    /// The follow flag is read before appending. A pending selection that
    /// becomes resolvable wins over following the bottom. Text still waiting
    /// for its newline counts as a row for scrolling but never resolves a
    /// selection.
    pub fn on_chunk(&mut self, text: &str) -> AppendReport {
        let follow = self.viewport.follow();

        let appended = self.log.append_chunk(text);
        if text.is_empty() {
            return AppendReport {
                appended,
                new_marks: 0,
                scroll: ScrollOutcome::Unchanged,
            };
        }
        self.viewport.set_content_height(self.log.row_count());

        let scroll = if let Some(line) = self.selection.resolve_pending(self.log.len()) {
            log::debug!("Pending selection resolved at line {}", line);
            self.viewport.scroll_row_to_top(line);
            ScrollOutcome::ResolvedSelection(line)
        } else if follow {
            self.viewport.scroll_to_bottom();
            ScrollOutcome::FollowedToBottom
        } else {
            ScrollOutcome::Unchanged
        };

        let new_marks = self.minimap.sync_range(&mut self.log, appended.clone());

        AppendReport {
            appended,
            new_marks,
            scroll,
        }
    }

    /// User clicked a line: focus it and put it at the top
    ///
    /// Returns `false` when the line does not exist.
    pub fn on_line_clicked(&mut self, line: usize) -> bool {
        if !self.log.contains(line) {
            return false;
        }
        self.selection.click(line);
        self.viewport.scroll_row_to_top(line);
        true
    }

    pub fn on_mark_clicked(&mut self, mark: &ScrollerMark) -> bool {
        self.on_line_clicked(mark.line)
    }

    /// Fragment set from outside: at start-up or changed by the user
    ///
    /// An existing line is focused right away; a missing one is remembered
    /// and focused once it streams in. `None` clears the selection.
    pub fn on_fragment_changed(&mut self, fragment: Option<LineFragment>) {
        let Some(fragment) = fragment else {
            self.selection.clear();
            return;
        };

        match self.selection.request(fragment.line(), self.log.len()) {
            Some(line) => self.viewport.scroll_row_to_top(line),
            None => log::debug!("Selection {} pending until the line arrives", fragment),
        }
    }

    pub fn on_scroll(&mut self, top: usize) {
        self.viewport.scroll_to(top);
    }

    pub fn on_scroll_by(&mut self, delta: isize) {
        self.viewport.scroll_by(delta);
    }

    pub fn on_scroll_to_bottom(&mut self) {
        self.viewport.scroll_to_bottom();
    }

    pub fn on_resize(&mut self, height: usize) {
        self.viewport.resize(height);
    }

    /// Next minimap mark after the focused line, or after the top row
    pub fn next_mark_after(&self, line: Option<usize>) -> Option<ScrollerMark> {
        match line.or(self.focused_line()) {
            Some(line) => self.minimap.next_after(line),
            None => self.minimap.marks().first().copied(),
        }
    }

    /// Previous minimap mark before the focused line, or before the end
    pub fn prev_mark_before(&self, line: Option<usize>) -> Option<ScrollerMark> {
        let line = line.or(self.focused_line()).unwrap_or(self.log.len());
        self.minimap.prev_before(line)
    }
}
