//! CI client trait
//!
//! Defines the interface the tail engine and the dashboard poll against.
//! Implementations can hit the real server or be swapped for fakes in tests.

use crate::error::ClientError;
use crate::types::{BuildSummary, LogChunk};
use async_trait::async_trait;

/// CI server client trait
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
#[async_trait]
pub trait CiClient: Send + Sync {
    /// Fetch the log bytes of a build starting at `start`
    ///
    /// # Arguments
    ///
    /// * `build_id` - Build whose log is being tailed
    /// * `start` - Byte offset of the first unseen byte
    ///
    /// # Returns
    ///
    /// The slice from `start` to the current end of the log. The slice is
    /// empty when the client has caught up with the producer.
    async fn fetch_log_chunk(&self, build_id: &str, start: u64) -> Result<LogChunk, ClientError>;

    /// Fetch the summaries of all known builds
    async fn fetch_builds(&self) -> Result<Vec<BuildSummary>, ClientError>;

    /// Human-facing URL of a build's log page, used to build shareable
    /// `#line<N>` links. `None` when the client has no such page.
    fn page_url(&self, _build_id: &str) -> Option<String> {
        None
    }
}
