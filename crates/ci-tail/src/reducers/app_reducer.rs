use crate::actions::{Action, DashboardAction, GlobalAction, LogViewAction};
use crate::reducers::{dashboard_reducer::reduce_dashboard, log_view_reducer::reduce_log_view};
use crate::state::{AppState, LogViewState, Screen};
use crate::views::layout::LogLayout;
use ci_tail_core::LogView;
use ratatui::layout::Rect;

/// Reducer - pure function that produces new state from current state + action
/// This is the root reducer that orchestrates all sub-reducers
pub fn reduce(mut state: AppState, action: &Action) -> AppState {
    match action {
        Action::Global(global) => reduce_global(state, global),

        Action::Dashboard(DashboardAction::OpenSelected) => state,
        Action::Dashboard(dashboard_action) => {
            state.dashboard = reduce_dashboard(state.dashboard, dashboard_action);
            state
        }

        Action::LogView(LogViewAction::Opened {
            session,
            build_id,
            fragment,
            share_url,
        }) => {
            let height = LogLayout::new(state.terminal).visible_lines();
            let view = LogView::with_fragment(height, *fragment);
            log::debug!("Opened log of build {} (session {})", build_id, session);
            state.log = Some(LogViewState::new(
                *session,
                build_id.clone(),
                share_url.clone(),
                view,
            ));
            state.screen = Screen::Log;
            state
        }

        Action::LogView(log_action) => {
            if let Some(log) = state.log.take() {
                if log_action.session().is_some_and(|s| s != log.session) {
                    log::trace!("Dropping result of closed session {:?}", log_action.session());
                    state.log = Some(log);
                } else {
                    state.log = Some(reduce_log_view(log, log_action));
                }
            }
            state
        }
    }
}

fn reduce_global(mut state: AppState, action: &GlobalAction) -> AppState {
    match action {
        GlobalAction::Quit => {
            state.running = false;
        }
        GlobalAction::Close => match state.screen {
            Screen::Log if state.has_dashboard => {
                log::debug!("Closing log viewer, back to dashboard");
                state.log = None;
                state.screen = Screen::Dashboard;
            }
            _ => {
                log::debug!("Closing last screen - quitting application");
                state.running = false;
            }
        },
        GlobalAction::Resize { width, height } => {
            state.terminal = Rect::new(0, 0, *width, *height);
            let lines = LogLayout::new(state.terminal).visible_lines();
            if let Some(log) = state.log.take() {
                state.log = Some(reduce_log_view(log, &LogViewAction::SetViewportHeight(lines)));
            }
        }
        // Raw input is translated by middleware
        GlobalAction::KeyPressed(_) | GlobalAction::Mouse(_) => {}
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use ci_tail_core::LineFragment;
    use pretty_assertions::assert_eq;

    fn opened(session: u64) -> Action {
        Action::LogView(LogViewAction::Opened {
            session,
            build_id: "42".to_string(),
            fragment: Some(LineFragment::new(1)),
            share_url: None,
        })
    }

    fn chunk(session: u64, output: &str) -> Action {
        Action::LogView(LogViewAction::ChunkReceived {
            session,
            output: output.to_string(),
            cursor: ci_tail_core::ByteCursor::new(output.len() as u64),
        })
    }

    fn sized_state() -> AppState {
        reduce(
            AppState::new("http://ci.test"),
            &Action::Global(GlobalAction::Resize {
                width: 80,
                height: 24,
            }),
        )
    }

    #[test]
    fn test_open_switches_screen() {
        let state = reduce(sized_state(), &opened(1));
        assert_eq!(state.screen, Screen::Log);
        let log = state.log.as_ref().unwrap();
        assert_eq!(log.view.viewport().height(), 22);
        assert_eq!(log.view.selection().pending(), Some(1));
    }

    #[test]
    fn test_stale_session_is_dropped() {
        let state = reduce(sized_state(), &opened(2));
        let state = reduce(state, &chunk(1, "old\n"));
        assert!(state.log.as_ref().unwrap().view.log().is_empty());

        let state = reduce(state, &chunk(2, "a\nb\n"));
        let log = state.log.as_ref().unwrap();
        assert_eq!(log.view.log().len(), 2);
        assert_eq!(log.view.focused_line(), Some(1));
    }

    #[test]
    fn test_close_returns_to_dashboard() {
        let state = reduce(sized_state(), &opened(1));
        let state = reduce(state, &Action::Global(GlobalAction::Close));
        assert_eq!(state.screen, Screen::Dashboard);
        assert!(state.log.is_none());
        assert!(state.running);

        let state = reduce(state, &Action::Global(GlobalAction::Close));
        assert!(!state.running);
    }

    #[test]
    fn test_close_without_dashboard_quits() {
        let mut state = sized_state();
        state.has_dashboard = false;
        let state = reduce(state, &opened(1));
        let state = reduce(state, &Action::Global(GlobalAction::Close));
        assert!(!state.running);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let state = reduce(sized_state(), &opened(1));
        let state = reduce(
            state,
            &Action::Global(GlobalAction::Resize {
                width: 80,
                height: 10,
            }),
        );
        assert_eq!(state.log.unwrap().view.viewport().height(), 8);
    }
}
