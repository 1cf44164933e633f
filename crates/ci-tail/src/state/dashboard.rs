use ci_tail_core::{BuildBoard, BuildRow};

/// Build list screen state
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub board: BuildBoard,
    /// Cursor position in the row list
    pub selected: usize,
    /// At least one poll succeeded
    pub loaded: bool,
    pub last_error: Option<String>,
}

impl DashboardState {
    pub fn selected_row(&self) -> Option<&BuildRow> {
        self.board.rows().get(self.selected)
    }
}
