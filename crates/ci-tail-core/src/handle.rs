//! Handle to a background polling task

use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};

/// Stop switch and join handle of a spawned loop
///
/// Dropping the handle stops the loop at its next suspension point.
#[derive(Debug)]
pub struct TaskHandle<T> {
    stop: watch::Sender<bool>,
    task: JoinHandle<T>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(stop: watch::Sender<bool>, task: JoinHandle<T>) -> Self {
        Self { stop, task }
    }

    /// Ask the loop to stop without waiting for it
    pub fn stop(&self) {
        self.stop.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the loop and wait for its result
    pub async fn shutdown(self) -> Result<T, JoinError> {
        self.stop();
        self.task.await
    }
}

/// Resolves once a stop was requested or every handle is gone
pub(crate) async fn stopped(stop: &mut watch::Receiver<bool>) {
    // Err means the sender was dropped, which also stops the loop
    let _ = stop.wait_for(|stop| *stop).await;
}
