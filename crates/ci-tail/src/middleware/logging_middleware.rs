use crate::actions::{Action, GlobalAction, LogViewAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;

/// LoggingMiddleware - logs all actions passing through
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(&mut self, action: &Action, _state: &AppState, _dispatcher: &Dispatcher) -> bool {
        match action {
            // Chunks can be large and arrive every second
            Action::LogView(LogViewAction::ChunkReceived {
                session,
                output,
                cursor,
            }) => {
                log::trace!(
                    "Action: ChunkReceived(session {}, {} bytes, cursor {})",
                    session,
                    output.len(),
                    cursor
                );
            }
            Action::LogView(LogViewAction::NothingNew { .. })
            | Action::Global(GlobalAction::Mouse(_)) => {
                log::trace!("Action: {:?}", action);
            }
            _ => log::debug!("Action: {:?}", action),
        }

        true // Always pass action through
    }
}
