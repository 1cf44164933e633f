use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::state::AppState;

pub mod dashboard_middleware;
pub mod keyboard_middleware;
pub mod logging_middleware;
pub mod mouse_middleware;
pub mod tail_middleware;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Long-running work (polling the server) is spawned onto the tokio runtime;
/// its results come back through the dispatcher.
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: Current application state (read-only snapshot)
    /// - `dispatcher`: Use to dispatch follow-up actions
    ///
    /// Returns `true` to continue chain, `false` to consume action
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool;
}
