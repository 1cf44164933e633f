//! Tail Middleware
//!
//! Owns the background fetcher of the open build log:
//! - Starts a `TailFetcher` when a log is opened
//! - Stops the previous fetcher before starting a new one
//! - Stops the fetcher when the log is closed or the app quits
//! - Dispatches fetcher results as `LogViewAction`s tagged with the session

use crate::actions::{Action, DashboardAction, GlobalAction, LogViewAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{AppState, Screen};
use ci_tail_client::CiClient;
use ci_tail_core::{FetcherConfig, LineFragment, TailFetcher, TailHandle};
use std::sync::Arc;
use tokio::runtime::Handle;

pub struct TailMiddleware {
    runtime: Handle,
    client: Arc<dyn CiClient>,
    config: FetcherConfig,
    /// Session id of the most recently opened log
    session: u64,
    active: Option<TailHandle>,
}

impl TailMiddleware {
    pub fn new(runtime: Handle, client: Arc<dyn CiClient>, config: FetcherConfig) -> Self {
        Self {
            runtime,
            client,
            config,
            session: 0,
            active: None,
        }
    }

    fn open(&mut self, build_id: &str, fragment: Option<LineFragment>, dispatcher: &Dispatcher) {
        self.stop_active();

        self.session += 1;
        let session = self.session;
        log::info!("TailMiddleware: opening build {} (session {})", build_id, session);

        // Opened must be queued before the first fetcher result
        dispatcher.dispatch(Action::LogView(LogViewAction::Opened {
            session,
            build_id: build_id.to_string(),
            fragment,
            share_url: self.client.page_url(build_id),
        }));

        let fetcher = TailFetcher::new(self.client.clone(), build_id, self.config);
        let dispatcher = dispatcher.clone();
        let _guard = self.runtime.enter();
        self.active = Some(fetcher.spawn(move |event| {
            dispatcher.dispatch(Action::LogView(LogViewAction::from_tail_event(
                session, event,
            )));
        }));
    }

    fn stop_active(&mut self) {
        if let Some(handle) = self.active.take() {
            log::debug!("TailMiddleware: stopping fetcher of session {}", self.session);
            handle.stop();
        }
    }
}

impl Middleware for TailMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        match action {
            Action::LogView(LogViewAction::Open { build_id, fragment }) => {
                self.open(build_id, *fragment, dispatcher);
                false
            }

            Action::Dashboard(DashboardAction::OpenSelected) => {
                if let Some(row) = state.dashboard.selected_row() {
                    dispatcher.dispatch(Action::LogView(LogViewAction::Open {
                        build_id: row.id().to_string(),
                        fragment: None,
                    }));
                }
                false
            }

            Action::Global(GlobalAction::Close) if state.screen == Screen::Log => {
                self.stop_active();
                true
            }

            Action::Global(GlobalAction::Quit) => {
                self.stop_active();
                true
            }

            _ => true,
        }
    }
}

impl Drop for TailMiddleware {
    fn drop(&mut self) {
        self.stop_active();
    }
}
