//! Fixed-delay tail polling

use crate::cursor::ByteCursor;
use crate::handle::{stopped, TaskHandle};
use ci_tail_client::{CiClient, ClientError, LogChunk};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Handle to a running [`TailFetcher`]; resolves to its final stats
pub type TailHandle = TaskHandle<PollStats>;

/// Polling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Delay between the end of one request and the start of the next
    pub poll_interval: Duration,

    /// Give up on a single request after this long
    pub request_timeout: Option<Duration>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Counters kept by the poll loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    /// Completed requests, successful or not
    pub polls: u64,
    /// Polls that returned new content
    pub chunks: u64,
    /// Polls that found nothing new
    pub empty_polls: u64,
    pub failures: u64,
    /// Failures since the last successful poll
    pub consecutive_failures: u64,
    /// Times the next poll was scheduled
    pub rearms: u64,
    /// Raw bytes received
    pub bytes: u64,
}

/// Outcome of one poll
#[derive(Debug)]
pub enum TailEvent {
    /// New content, starting exactly at `start`
    Chunk {
        chunk: LogChunk,
        start: ByteCursor,
        cursor: ByteCursor,
    },
    /// Caught up with the producer
    Empty { cursor: ByteCursor },
    /// The request failed; the cursor did not move
    FetchFailed {
        error: ClientError,
        cursor: ByteCursor,
        consecutive_failures: u64,
    },
}

/// Follows one build log by byte offset
///
/// Owns the cursor. Requests never overlap: the next one is scheduled only
/// after the previous one resolved.
pub struct TailFetcher<C: CiClient + ?Sized> {
    client: Arc<C>,
    build_id: String,
    cursor: ByteCursor,
    config: FetcherConfig,
    stats: PollStats,
}

impl<C: CiClient + ?Sized + 'static> TailFetcher<C> {
    pub fn new(client: Arc<C>, build_id: impl Into<String>, config: FetcherConfig) -> Self {
        Self {
            client,
            build_id: build_id.into(),
            cursor: ByteCursor::default(),
            config,
            stats: PollStats::default(),
        }
    }

    /// Resume from a known offset instead of the start of the log
    pub fn starting_at(mut self, cursor: ByteCursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn build_id(&self) -> &str {
        &self.build_id
    }

    pub fn cursor(&self) -> ByteCursor {
        self.cursor
    }

    pub fn stats(&self) -> PollStats {
        self.stats
    }

    async fn fetch(&self) -> Result<LogChunk, ClientError> {
        let request = self
            .client
            .fetch_log_chunk(&self.build_id, self.cursor.offset());
        match self.config.request_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| ClientError::Timeout(limit))?,
            None => request.await,
        }
    }

    /// Issue one request and account for its result
    pub async fn poll_once(&mut self) -> TailEvent {
        let result = self.fetch().await;
        self.stats.polls += 1;

        match result {
            Ok(chunk) if chunk.is_empty() => {
                self.stats.empty_polls += 1;
                self.stats.consecutive_failures = 0;
                log::trace!("{}: no new output at {}", self.build_id, self.cursor);
                TailEvent::Empty {
                    cursor: self.cursor,
                }
            }
            Ok(chunk) => {
                let start = self.cursor;
                self.cursor.advance(&chunk);
                self.stats.chunks += 1;
                self.stats.bytes += chunk.byte_length;
                self.stats.consecutive_failures = 0;
                log::debug!(
                    "{}: received {} bytes, cursor {} -> {}",
                    self.build_id,
                    chunk.byte_length,
                    start,
                    self.cursor
                );
                TailEvent::Chunk {
                    chunk,
                    start,
                    cursor: self.cursor,
                }
            }
            Err(error) => {
                self.stats.failures += 1;
                self.stats.consecutive_failures += 1;
                log::warn!(
                    "{}: poll at {} failed ({} in a row): {}",
                    self.build_id,
                    self.cursor,
                    self.stats.consecutive_failures,
                    error
                );
                TailEvent::FetchFailed {
                    error,
                    cursor: self.cursor,
                    consecutive_failures: self.stats.consecutive_failures,
                }
            }
        }
    }

    /// Poll until stopped, handing every outcome to `on_event`
    ///
    /// The first poll is issued immediately. Failures are reported and the
    /// loop keeps going with the same delay.
    pub async fn run<F>(mut self, mut on_event: F, mut stop: watch::Receiver<bool>) -> PollStats
    where
        F: FnMut(TailEvent),
    {
        log::info!(
            "Tailing build {} from byte {}",
            self.build_id,
            self.cursor
        );

        loop {
            if *stop.borrow() {
                break;
            }

            let event = tokio::select! {
                biased;
                _ = stopped(&mut stop) => break,
                event = self.poll_once() => event,
            };
            on_event(event);

            self.stats.rearms += 1;
            tokio::select! {
                biased;
                _ = stopped(&mut stop) => break,
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }

        log::info!(
            "Stopped tailing build {} at byte {} after {} polls",
            self.build_id,
            self.cursor,
            self.stats.polls
        );
        self.stats
    }

    /// Run the loop on the tokio runtime
    pub fn spawn<F>(self, on_event: F) -> TailHandle
    where
        F: FnMut(TailEvent) + Send + 'static,
    {
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(on_event, stop_rx));
        TaskHandle::new(stop_tx, task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ci_tail_client::BuildSummary;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    enum Reply {
        Chunk(&'static str),
        Malformed,
        Status(u16),
        Hang,
    }

    /// Mock client replaying scripted replies, then reporting no new output
    struct MockClient {
        replies: Mutex<VecDeque<Reply>>,
        starts: Mutex<Vec<u64>>,
    }

    impl MockClient {
        fn new(replies: Vec<Reply>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                starts: Mutex::new(Vec::new()),
            })
        }

        fn starts(&self) -> Vec<u64> {
            self.starts.lock().unwrap().clone()
        }

        fn call_count(&self) -> usize {
            self.starts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CiClient for MockClient {
        async fn fetch_log_chunk(&self, _build_id: &str, start: u64) -> Result<LogChunk, ClientError> {
            self.starts.lock().unwrap().push(start);
            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(Reply::Chunk(output)) => Ok(LogChunk {
                    output: output.to_string(),
                    byte_length: output.len() as u64,
                }),
                Some(Reply::Malformed) => Err(ClientError::Malformed("bad json".to_string())),
                Some(Reply::Status(status)) => Err(ClientError::Status {
                    status,
                    url: "http://ci.test".to_string(),
                }),
                Some(Reply::Hang) => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(LogChunk::default())
                }
                None => Ok(LogChunk::default()),
            }
        }

        async fn fetch_builds(&self) -> Result<Vec<BuildSummary>, ClientError> {
            Ok(vec![])
        }
    }

    fn fast_config() -> FetcherConfig {
        FetcherConfig {
            poll_interval: Duration::from_millis(1),
            request_timeout: None,
        }
    }

    #[tokio::test]
    async fn test_cursor_follows_chunks() {
        let client = MockClient::new(vec![Reply::Chunk("abc"), Reply::Chunk(""), Reply::Chunk("def")]);
        let mut fetcher = TailFetcher::new(client.clone(), "7", fast_config());

        let mut text = String::new();
        for _ in 0..3 {
            if let TailEvent::Chunk { chunk, .. } = fetcher.poll_once().await {
                text.push_str(&chunk.output);
            }
        }

        assert_eq!(text, "abcdef");
        assert_eq!(fetcher.cursor().offset(), 6);
        assert_eq!(client.starts(), vec![0, 3, 3]);
        assert_eq!(fetcher.stats().empty_polls, 1);
    }

    #[tokio::test]
    async fn test_thirty_seven_bytes_in_five_polls() {
        let client = MockClient::new(vec![
            Reply::Chunk("step 1 ok\n"),
            Reply::Chunk("step 2 ok\n"),
            Reply::Chunk("step 3 ok\n"),
            Reply::Chunk("passed\n"),
        ]);
        let fetcher = TailFetcher::new(client.clone(), "7", fast_config());

        let (stop_tx, stop_rx) = watch::channel(false);
        let mut events = Vec::new();
        let stats = fetcher
            .run(
                |event| {
                    events.push(event);
                    if events.len() == 5 {
                        stop_tx.send_replace(true);
                    }
                },
                stop_rx,
            )
            .await;

        assert_eq!(stats.bytes, 37);
        assert_eq!(stats.polls, 5);
        assert_eq!(stats.rearms, 5);
        assert_eq!(stats.chunks, 4);
        assert_eq!(stats.empty_polls, 1);
        assert_eq!(client.starts(), vec![0, 10, 20, 30, 37]);
        assert!(matches!(
            events.last(),
            Some(TailEvent::Empty { cursor }) if cursor.offset() == 37
        ));

        let mut log = crate::LineLog::new();
        for event in &events {
            if let TailEvent::Chunk { chunk, .. } = event {
                log.append_chunk(&chunk.output);
            }
        }
        assert_eq!(log.text(), "step 1 ok\nstep 2 ok\nstep 3 ok\npassed\n");
        let raws: Vec<&str> = log.iter().map(|r| r.raw()).collect();
        assert_eq!(raws, vec!["step 1 ok\n", "step 2 ok\n", "step 3 ok\n", "passed\n"]);
    }

    #[tokio::test]
    async fn test_failures_keep_cursor_and_loop_alive() {
        let client = MockClient::new(vec![
            Reply::Chunk("abc"),
            Reply::Status(502),
            Reply::Malformed,
            Reply::Chunk("def"),
        ]);
        let fetcher = TailFetcher::new(client.clone(), "7", fast_config());

        let (stop_tx, stop_rx) = watch::channel(false);
        let mut failures = Vec::new();
        let mut seen = 0;
        let stats = fetcher
            .run(
                |event| {
                    seen += 1;
                    if let TailEvent::FetchFailed {
                        error,
                        cursor,
                        consecutive_failures,
                    } = event
                    {
                        failures.push((error.is_malformed(), cursor.offset(), consecutive_failures));
                    }
                    if seen == 4 {
                        stop_tx.send_replace(true);
                    }
                },
                stop_rx,
            )
            .await;

        assert_eq!(failures, vec![(false, 3, 1), (true, 3, 2)]);
        assert_eq!(client.starts(), vec![0, 3, 3, 3]);
        assert_eq!(stats.failures, 2);
        assert_eq!(stats.consecutive_failures, 0);
        assert_eq!(stats.bytes, 6);
    }

    #[tokio::test]
    async fn test_request_timeout_is_a_failure() {
        let client = MockClient::new(vec![Reply::Hang]);
        let mut fetcher = TailFetcher::new(
            client.clone(),
            "7",
            FetcherConfig {
                poll_interval: Duration::from_millis(1),
                request_timeout: Some(Duration::from_millis(10)),
            },
        );

        match fetcher.poll_once().await {
            TailEvent::FetchFailed { error, .. } => {
                assert!(matches!(error, ClientError::Timeout(_)))
            }
            other => panic!("expected a failure, got {:?}", other),
        }
        assert_eq!(fetcher.cursor().offset(), 0);
    }

    #[tokio::test]
    async fn test_starting_at_resumes() {
        let client = MockClient::new(vec![Reply::Chunk("tail")]);
        let mut fetcher =
            TailFetcher::new(client.clone(), "7", fast_config()).starting_at(ByteCursor::new(100));
        fetcher.poll_once().await;
        assert_eq!(client.starts(), vec![100]);
        assert_eq!(fetcher.cursor().offset(), 104);
    }

    #[tokio::test]
    async fn test_spawned_loop_stops_on_shutdown() {
        let client = MockClient::new(vec![Reply::Chunk("abc")]);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let handle = TailFetcher::new(client.clone(), "7", fast_config()).spawn(move |event| {
            let _ = tx.send(event);
        });

        // Wait until at least two polls happened
        rx.recv().await.unwrap();
        rx.recv().await.unwrap();

        let stats = handle.shutdown().await.unwrap();
        assert!(stats.polls >= 2);
        assert_eq!(stats.bytes, 3);

        let calls = client.call_count();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(client.call_count(), calls);
    }

    #[tokio::test]
    async fn test_stop_interrupts_pending_request() {
        let client = MockClient::new(vec![Reply::Hang]);
        let handle = TailFetcher::new(client.clone(), "7", fast_config()).spawn(|_| {});

        while client.call_count() == 0 {
            tokio::task::yield_now().await;
        }
        let stats = handle.shutdown().await.unwrap();
        assert_eq!(stats.polls, 0);
    }
}
