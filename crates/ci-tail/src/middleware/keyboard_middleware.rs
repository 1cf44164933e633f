//! KeyboardMiddleware - translates key presses into screen actions

use crate::actions::{Action, DashboardAction, GlobalAction, LogViewAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{AppState, LogViewState};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyboardMiddleware;

impl KeyboardMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeyboardMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for KeyboardMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        if let Action::Global(GlobalAction::KeyPressed(key)) = action {
            if let Some(action) = translate_key(key, state) {
                dispatcher.dispatch(action);
            }
            // Consume the raw key event (don't pass to reducer)
            return false;
        }

        true
    }
}

/// Map a key press to the action it means on the current screen
pub fn translate_key(key: &KeyEvent, state: &AppState) -> Option<Action> {
    // Ctrl+C: quit from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Global(GlobalAction::Quit));
    }

    match state.active_log() {
        Some(log) => translate_log_key(key, log),
        None => translate_dashboard_key(key),
    }
}

fn translate_dashboard_key(key: &KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Global(GlobalAction::Close)),
        KeyCode::Char('j') | KeyCode::Down => DashboardAction::NavigateNext,
        KeyCode::Char('k') | KeyCode::Up => DashboardAction::NavigatePrevious,
        KeyCode::Enter => DashboardAction::OpenSelected,
        _ => return None,
    };
    Some(Action::Dashboard(action))
}

fn translate_log_key(key: &KeyEvent, log: &LogViewState) -> Option<Action> {
    // Go-to-line prompt captures all input while open
    if log.goto_input.is_some() {
        let action = match key.code {
            KeyCode::Char(c) => LogViewAction::GotoChar(c),
            KeyCode::Backspace => LogViewAction::GotoBackspace,
            KeyCode::Enter => LogViewAction::GotoConfirm,
            KeyCode::Esc => LogViewAction::GotoCancel,
            _ => return None,
        };
        return Some(Action::LogView(action));
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Global(GlobalAction::Close)),
        KeyCode::Char('d') if ctrl => LogViewAction::ScrollPages(1),
        KeyCode::Char('u') if ctrl => LogViewAction::ScrollPages(-1),
        KeyCode::Char('j') | KeyCode::Down => LogViewAction::ScrollBy(1),
        KeyCode::Char('k') | KeyCode::Up => LogViewAction::ScrollBy(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => LogViewAction::ScrollPages(1),
        KeyCode::PageUp => LogViewAction::ScrollPages(-1),
        KeyCode::Char('g') | KeyCode::Home => LogViewAction::ScrollToTop,
        KeyCode::Char('G') | KeyCode::End => LogViewAction::ScrollToBottom,
        KeyCode::Char('n') => LogViewAction::NextMark,
        KeyCode::Char('N') | KeyCode::Char('p') => LogViewAction::PrevMark,
        KeyCode::Char(':') => LogViewAction::GotoStart,
        _ => return None,
    };
    Some(Action::LogView(action))
}
