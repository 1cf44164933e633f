//! CI server client
//!
//! This crate provides a trait-based client for the two read-only endpoints
//! the log viewer consumes: the incremental log feed and the build list.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                CiClient trait                    │
//! │  - fetch_log_chunk(build_id, start)              │
//! │  - fetch_builds()                                │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!              ┌─────────────────┐
//!              │  HttpCiClient   │
//!              │  (reqwest)      │
//!              └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use ci_tail_client::{CiClient, HttpCiClient};
//!
//! # async fn example() -> Result<(), ci_tail_client::ClientError> {
//! let client = HttpCiClient::new("http://ci.internal:8080")?;
//! let chunk = client.fetch_log_chunk("42", 0).await?;
//! println!("{} new bytes", chunk.byte_length);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod http_client;
pub mod types;

pub use client::CiClient;
pub use error::ClientError;
pub use http_client::HttpCiClient;
pub use types::{BuildSummary, Commit, LogChunk};
