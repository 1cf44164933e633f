//! Client error taxonomy

use std::time::Duration;
use thiserror::Error;

/// Errors returned by [`crate::CiClient`] implementations
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid server URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ClientError {
    /// The server answered, but not with something we can use
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}
