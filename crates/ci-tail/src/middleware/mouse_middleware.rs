//! MouseMiddleware - turns clicks and wheel events into screen actions
//!
//! Hit-testing uses the same layouts the views render with.

use crate::actions::{Action, DashboardAction, GlobalAction, LogViewAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{AppState, LogViewState};
use crate::view_models::log_view_model::mark_at_row;
use crate::views::layout::{contains, DashboardLayout, LogLayout};
use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Lines moved per wheel notch
const WHEEL_STEP: isize = 3;

pub struct MouseMiddleware;

impl MouseMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MouseMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for MouseMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        if let Action::Global(GlobalAction::Mouse(event)) = action {
            if let Some(action) = translate_mouse(event, state) {
                dispatcher.dispatch(action);
            }
            return false;
        }

        true
    }
}

pub fn translate_mouse(event: &MouseEvent, state: &AppState) -> Option<Action> {
    match state.active_log() {
        Some(log) => translate_log_mouse(event, log, state),
        None => translate_dashboard_mouse(event, state),
    }
}

fn translate_log_mouse(event: &MouseEvent, log: &LogViewState, state: &AppState) -> Option<Action> {
    let layout = LogLayout::new(state.terminal);

    let action = match event.kind {
        MouseEventKind::ScrollDown => LogViewAction::ScrollBy(WHEEL_STEP),
        MouseEventKind::ScrollUp => LogViewAction::ScrollBy(-WHEEL_STEP),
        MouseEventKind::Down(MouseButton::Left) => {
            if contains(layout.lines, event.column, event.row) {
                let row = (event.row - layout.lines.y) as usize;
                let line = log.view.viewport().scroll_top() + row;
                if !log.view.log().contains(line) {
                    return None;
                }
                LogViewAction::LineClicked(line)
            } else if contains(layout.minimap, event.column, event.row) {
                let row = (event.row - layout.minimap.y) as usize;
                let line = mark_at_row(&log.view, row, layout.minimap.height as usize)?;
                LogViewAction::MarkClicked(line)
            } else {
                return None;
            }
        }
        _ => return None,
    };
    Some(Action::LogView(action))
}

fn translate_dashboard_mouse(event: &MouseEvent, state: &AppState) -> Option<Action> {
    let layout = DashboardLayout::new(state.terminal);

    let action = match event.kind {
        MouseEventKind::ScrollDown => DashboardAction::NavigateNext,
        MouseEventKind::ScrollUp => DashboardAction::NavigatePrevious,
        MouseEventKind::Down(MouseButton::Left) => {
            if !contains(layout.table, event.column, event.row) || event.row < layout.first_row_y() {
                return None;
            }
            let pos = layout.row_offset(state.dashboard.selected)
                + (event.row - layout.first_row_y()) as usize;
            if pos == state.dashboard.selected {
                // Second click on the selected row opens it
                DashboardAction::OpenSelected
            } else {
                DashboardAction::Select(pos)
            }
        }
        _ => return None,
    };
    Some(Action::Dashboard(action))
}
