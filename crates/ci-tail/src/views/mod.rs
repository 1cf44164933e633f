use crate::state::AppState;
use ratatui::Frame;

pub mod dashboard_view;
pub mod layout;
pub mod log_view;

/// Render the screen that is in front
pub fn render(state: &AppState, f: &mut Frame) {
    let area = f.area();
    match state.active_log() {
        Some(log) => log_view::render(log, &state.theme, area, f),
        None => dashboard_view::render(state, area, f),
    }
}
