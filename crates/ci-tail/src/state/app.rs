use super::{DashboardState, LogViewState};
use ci_tail_theme::Theme;
use ratatui::layout::Rect;

/// Which screen is in front
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Dashboard,
    Log,
}

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub running: bool,
    pub screen: Screen,
    /// Whether closing the log viewer goes back to the dashboard
    pub has_dashboard: bool,
    pub dashboard: DashboardState,
    pub log: Option<LogViewState>,
    pub server_url: String,
    /// Last known terminal size
    pub terminal: Rect,
    pub theme: Theme,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            running: true,
            screen: Screen::default(),
            has_dashboard: true,
            dashboard: DashboardState::default(),
            log: None,
            server_url: String::new(),
            terminal: Rect::default(),
            theme: Theme::default(),
        }
    }
}

impl AppState {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
        }
    }

    /// The open log, if the log screen is in front
    pub fn active_log(&self) -> Option<&LogViewState> {
        match self.screen {
            Screen::Log => self.log.as_ref(),
            Screen::Dashboard => None,
        }
    }
}
