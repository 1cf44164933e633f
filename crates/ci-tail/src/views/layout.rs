//! Screen layouts shared by rendering and mouse hit-testing

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the minimap column
const MINIMAP_WIDTH: u16 = 2;

/// Areas of the log viewer screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLayout {
    pub header: Rect,
    pub lines: Rect,
    pub minimap: Rect,
    pub status: Rect,
}

impl LogLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Build header
                Constraint::Min(0),    // Log body
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(MINIMAP_WIDTH)])
            .split(rows[1]);

        Self {
            header: rows[0],
            lines: body[0],
            minimap: body[1],
            status: rows[2],
        }
    }

    /// Number of log lines that fit on screen
    pub fn visible_lines(&self) -> usize {
        self.lines.height as usize
    }
}

/// Areas of the build list screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    pub table: Rect,
    pub help: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: rows[0],
            table: rows[1],
            help: rows[2],
        }
    }

    /// Screen row of the first build (below the border and column header)
    pub fn first_row_y(&self) -> u16 {
        self.table.y + 2
    }

    /// Rows of builds that fit in the table
    pub fn visible_rows(&self) -> usize {
        self.table.height.saturating_sub(3) as usize
    }

    /// Index of the first build drawn, keeping `selected` on screen
    pub fn row_offset(&self, selected: usize) -> usize {
        (selected + 1).saturating_sub(self.visible_rows().max(1))
    }
}

pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}
