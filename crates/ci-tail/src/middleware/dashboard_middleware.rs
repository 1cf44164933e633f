//! Dashboard Middleware
//!
//! Polls the build list in the background once the dashboard starts and
//! dispatches `BuildsLoaded`/`LoadError` with the results.

use crate::actions::{Action, DashboardAction, GlobalAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;
use ci_tail_client::CiClient;
use ci_tail_core::{BoardEvent, BoardPoller, TaskHandle};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

pub struct DashboardMiddleware {
    runtime: Handle,
    client: Arc<dyn CiClient>,
    interval: Duration,
    poller: Option<TaskHandle<u64>>,
}

impl DashboardMiddleware {
    pub fn new(runtime: Handle, client: Arc<dyn CiClient>, interval: Duration) -> Self {
        Self {
            runtime,
            client,
            interval,
            poller: None,
        }
    }

    fn start(&mut self, dispatcher: &Dispatcher) {
        if self.poller.is_some() {
            log::debug!("DashboardMiddleware: poller already running");
            return;
        }

        log::info!(
            "DashboardMiddleware: polling build list every {:?}",
            self.interval
        );
        let dispatcher = dispatcher.clone();
        let poller = BoardPoller::new(self.client.clone(), self.interval);
        let _guard = self.runtime.enter();
        self.poller = Some(poller.spawn(move |event| {
            let action = match event {
                BoardEvent::Builds(builds) => DashboardAction::BuildsLoaded(builds),
                BoardEvent::FetchFailed(error) => DashboardAction::LoadError(error.to_string()),
            };
            dispatcher.dispatch(Action::Dashboard(action));
        }));
    }
}

impl Middleware for DashboardMiddleware {
    fn handle(&mut self, action: &Action, _state: &AppState, dispatcher: &Dispatcher) -> bool {
        match action {
            Action::Dashboard(DashboardAction::StartPolling) => {
                self.start(dispatcher);
                true
            }
            Action::Global(GlobalAction::Quit) => {
                if let Some(poller) = self.poller.take() {
                    poller.stop();
                }
                true
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ci_tail_client::{BuildSummary, ClientError, LogChunk};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::runtime::Runtime;

    struct MockClient {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CiClient for MockClient {
        async fn fetch_log_chunk(&self, _build_id: &str, _start: u64) -> Result<LogChunk, ClientError> {
            Ok(LogChunk::default())
        }

        async fn fetch_builds(&self) -> Result<Vec<BuildSummary>, ClientError> {
            // Every other poll fails
            if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
                Ok(vec![])
            } else {
                Err(ClientError::Status {
                    status: 502,
                    url: "http://ci.test/builds".to_string(),
                })
            }
        }
    }

    #[test]
    fn test_start_polling_dispatches_results() {
        let runtime = Runtime::new().unwrap();
        let client = Arc::new(MockClient {
            calls: AtomicUsize::new(0),
        });
        let mut middleware = DashboardMiddleware::new(
            runtime.handle().clone(),
            client.clone(),
            Duration::from_millis(10),
        );
        let dispatcher = Dispatcher::new();
        let state = AppState::default();

        let start = Action::Dashboard(DashboardAction::StartPolling);
        assert!(middleware.handle(&start, &state, &dispatcher));
        // A second start does not spawn another poller
        assert!(middleware.handle(&start, &state, &dispatcher));
        std::thread::sleep(Duration::from_millis(60));
        middleware.handle(&Action::Global(GlobalAction::Quit), &state, &dispatcher);

        let actions: Vec<_> = std::iter::from_fn(|| dispatcher.pop()).collect();
        assert!(matches!(
            actions[0],
            Action::Dashboard(DashboardAction::BuildsLoaded(_))
        ));
        assert!(matches!(
            &actions[1],
            Action::Dashboard(DashboardAction::LoadError(message)) if message.contains("502")
        ));
        assert!(client.calls.load(Ordering::SeqCst) >= 2);
    }
}
