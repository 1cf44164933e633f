//! Build list dashboard
//!
//! Polls the build list, keeps one row per build ID and tracks status
//! changes. Unknown builds are prepended, so the newest build is on top.

use crate::handle::{stopped, TaskHandle};
use ci_tail_client::{BuildSummary, CiClient, ClientError};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStatus {
    Running,
    Passed,
    Failed,
}

impl BuildStatus {
    pub fn of(build: &BuildSummary) -> Self {
        match (build.complete, build.success) {
            (false, _) => Self::Running,
            (true, true) => Self::Passed,
            (true, false) => Self::Failed,
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Running => "running",
            Self::Passed => "passed",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// One dashboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRow {
    pub build: BuildSummary,
    pub status: BuildStatus,
}

impl BuildRow {
    fn new(build: BuildSummary) -> Self {
        let status = BuildStatus::of(&build);
        Self { build, status }
    }

    pub fn id(&self) -> &str {
        &self.build.id
    }

    pub fn title(&self) -> String {
        self.build.title()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub id: String,
    pub from: BuildStatus,
    pub to: BuildStatus,
}

/// What changed on the board after one poll
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardDiff {
    /// IDs of rows created by this poll, in arrival order
    pub created: Vec<String>,
    pub status_changed: Vec<StatusChange>,
}

impl BoardDiff {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.status_changed.is_empty()
    }
}

/// Rows keyed by build ID, newest first
///
/// Rows are never removed; a build that disappears from the server's list
/// keeps its last known state.
#[derive(Debug, Clone, Default)]
pub struct BuildBoard {
    rows: Vec<BuildRow>,
    index: HashMap<String, usize>,
}

impl BuildBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one poll result into the board
    pub fn apply(&mut self, builds: &[BuildSummary]) -> BoardDiff {
        let mut diff = BoardDiff::default();

        for build in builds {
            match self.position(&build.id) {
                Some(pos) => {
                    let row = &mut self.rows[pos];
                    let status = BuildStatus::of(build);
                    if row.status != status {
                        diff.status_changed.push(StatusChange {
                            id: build.id.clone(),
                            from: row.status,
                            to: status,
                        });
                    }
                    *row = BuildRow::new(build.clone());
                }
                None => {
                    self.rows.insert(0, BuildRow::new(build.clone()));
                    diff.created.push(build.id.clone());
                    self.reindex();
                }
            }
        }

        if !diff.is_empty() {
            log::debug!(
                "Board: {} new builds, {} status changes",
                diff.created.len(),
                diff.status_changed.len()
            );
        }
        diff
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    fn reindex(&mut self) {
        self.index = self
            .rows
            .iter()
            .enumerate()
            .map(|(pos, row)| (row.build.id.clone(), pos))
            .collect();
    }

    pub fn rows(&self) -> &[BuildRow] {
        &self.rows
    }

    pub fn get(&self, id: &str) -> Option<&BuildRow> {
        self.position(id).map(|pos| &self.rows[pos])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn count(&self, status: BuildStatus) -> usize {
        self.rows.iter().filter(|r| r.status == status).count()
    }
}

/// Outcome of one build list poll
#[derive(Debug)]
pub enum BoardEvent {
    Builds(Vec<BuildSummary>),
    FetchFailed(ClientError),
}

/// Fixed-delay poller for the build list
pub struct BoardPoller<C: CiClient + ?Sized> {
    client: Arc<C>,
    interval: Duration,
}

impl<C: CiClient + ?Sized + 'static> BoardPoller<C> {
    pub fn new(client: Arc<C>, interval: Duration) -> Self {
        Self { client, interval }
    }

    pub async fn poll_once(&self) -> BoardEvent {
        match self.client.fetch_builds().await {
            Ok(builds) => BoardEvent::Builds(builds),
            Err(error) => {
                log::warn!("Build list poll failed: {}", error);
                BoardEvent::FetchFailed(error)
            }
        }
    }

    /// Poll until stopped; returns the number of completed polls
    pub async fn run<F>(self, mut on_event: F, mut stop: watch::Receiver<bool>) -> u64
    where
        F: FnMut(BoardEvent),
    {
        let mut polls = 0;
        loop {
            if *stop.borrow() {
                break;
            }
            let event = tokio::select! {
                biased;
                _ = stopped(&mut stop) => break,
                event = self.poll_once() => event,
            };
            polls += 1;
            on_event(event);

            tokio::select! {
                biased;
                _ = stopped(&mut stop) => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        log::debug!("Build list poller stopped after {} polls", polls);
        polls
    }

    pub fn spawn<F>(self, on_event: F) -> TaskHandle<u64>
    where
        F: FnMut(BoardEvent) + Send + 'static,
    {
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(on_event, stop_rx));
        TaskHandle::new(stop_tx, task)
    }
}
