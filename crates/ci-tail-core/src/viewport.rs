//! Visible window over the line log
//!
//! Positions are measured in rows; every line occupies one row.

use std::ops::Range;

/// Scroll position and the follow flag
///
/// `follow` is true exactly when the bottom edge of the viewport sits on the
/// bottom edge of the document. It is recomputed on every scroll, including
/// scrolls the engine issues itself, and left alone when content grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    scroll_top: usize,
    height: usize,
    content_height: usize,
    follow: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Viewport {
    /// An empty document fits any viewport, so a new viewport follows
    pub fn new(height: usize) -> Self {
        Self {
            scroll_top: 0,
            height,
            content_height: 0,
            follow: true,
        }
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn content_height(&self) -> usize {
        self.content_height
    }

    pub fn follow(&self) -> bool {
        self.follow
    }

    /// Largest reachable `scroll_top`
    pub fn max_top(&self) -> usize {
        self.content_height.saturating_sub(self.height)
    }

    /// Rows currently on screen
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.scroll_top + self.height).min(self.content_height);
        self.scroll_top.min(end)..end
    }

    pub fn is_visible(&self, row: usize) -> bool {
        self.visible_range().contains(&row)
    }

    /// Scroll event: move to `top` (clamped) and recompute `follow`
    pub fn scroll_to(&mut self, top: usize) {
        self.scroll_top = top.min(self.max_top());
        self.follow = self.scroll_top == self.max_top();
    }

    /// Scroll relative to the current position
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_to(self.scroll_top.saturating_add_signed(delta));
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_to(self.max_top());
    }

    /// Put `row` at the top edge, as far as the document allows
    pub fn scroll_row_to_top(&mut self, row: usize) {
        self.scroll_to(row);
    }

    /// Document grew; `follow` is consulted by the caller, not changed here
    pub fn set_content_height(&mut self, content_height: usize) {
        self.content_height = content_height;
        self.scroll_top = self.scroll_top.min(self.max_top());
    }

    /// Viewport changed size
    ///
    /// A following viewport stays pinned to the bottom; any other viewport
    /// keeps its top row where possible.
    pub fn resize(&mut self, height: usize) {
        let was_following = self.follow;
        self.height = height;
        if was_following {
            self.scroll_to_bottom();
        } else {
            self.scroll_to(self.scroll_top);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_viewport_follows() {
        let viewport = Viewport::new(10);
        assert!(viewport.follow());
        assert_eq!(viewport.max_top(), 0);
    }

    #[test]
    fn test_growth_does_not_touch_follow() {
        let mut viewport = Viewport::new(10);
        viewport.set_content_height(50);
        assert!(viewport.follow());
        assert_eq!(viewport.scroll_top(), 0);

        viewport.scroll_to(5);
        assert!(!viewport.follow());
        viewport.set_content_height(80);
        assert!(!viewport.follow());
        assert_eq!(viewport.scroll_top(), 5);
    }

    #[test]
    fn test_scroll_recomputes_follow() {
        let mut viewport = Viewport::new(10);
        viewport.set_content_height(30);
        viewport.scroll_to(19);
        assert!(!viewport.follow());
        viewport.scroll_to(20);
        assert!(viewport.follow());
        // Clamped to the bottom
        viewport.scroll_to(500);
        assert_eq!(viewport.scroll_top(), 20);
        assert!(viewport.follow());
    }

    #[test]
    fn test_row_to_top_near_end_lands_on_bottom() {
        let mut viewport = Viewport::new(10);
        viewport.set_content_height(30);
        viewport.scroll_row_to_top(25);
        assert_eq!(viewport.scroll_top(), 20);
        assert!(viewport.follow());

        viewport.scroll_row_to_top(3);
        assert_eq!(viewport.scroll_top(), 3);
        assert!(!viewport.follow());
    }

    #[test]
    fn test_visible_range() {
        let mut viewport = Viewport::new(4);
        viewport.set_content_height(2);
        assert_eq!(viewport.visible_range(), 0..2);
        viewport.set_content_height(10);
        viewport.scroll_to(3);
        assert_eq!(viewport.visible_range(), 3..7);
        assert!(viewport.is_visible(6));
        assert!(!viewport.is_visible(7));
    }

    #[test]
    fn test_scroll_by() {
        let mut viewport = Viewport::new(4);
        viewport.set_content_height(10);
        viewport.scroll_by(-3);
        assert_eq!(viewport.scroll_top(), 0);
        viewport.scroll_by(2);
        assert_eq!(viewport.scroll_top(), 2);
    }

    #[test]
    fn test_resize() {
        let mut viewport = Viewport::new(10);
        viewport.set_content_height(30);
        viewport.scroll_to_bottom();
        viewport.resize(5);
        assert_eq!(viewport.scroll_top(), 25);
        assert!(viewport.follow());

        viewport.scroll_to(4);
        viewport.resize(28);
        assert_eq!(viewport.scroll_top(), 2);
        assert!(viewport.follow());
    }
}
