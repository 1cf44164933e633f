//! CI server data transfer objects
//!
//! Field names follow the server's JSON; the Go-style capitalised names
//! older servers emit are accepted as aliases.

use crate::error::ClientError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// The next unseen slice of a build log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogChunk {
    /// Raw text of the slice, ANSI escapes preserved
    pub output: String,

    /// Byte length of the raw slice on the server
    ///
    /// This is what the cursor advances by. It is the length before any
    /// escaping or colour conversion, so it can differ from the number of
    /// characters in `output`.
    pub byte_length: u64,
}

/// Wire shape of the log endpoint response
#[derive(Debug, Deserialize)]
struct LogChunkResponse {
    output: String,
    #[serde(default)]
    length: Option<u64>,
}

impl LogChunk {
    /// Whether the producer had nothing new
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Decode a log endpoint response body
    ///
    /// A missing `length` falls back to the UTF-8 byte length of `output`.
    /// An empty `output` always yields an empty chunk so the cursor cannot
    /// move without content.
    pub fn decode(body: &str) -> Result<Self, ClientError> {
        let response: LogChunkResponse = serde_json::from_str(body)
            .map_err(|e| ClientError::Malformed(format!("log chunk: {}", e)))?;

        if response.output.is_empty() {
            return Ok(Self::default());
        }

        let byte_length = response.length.unwrap_or(response.output.len() as u64);
        if byte_length == 0 {
            return Err(ClientError::Malformed(
                "log chunk: zero length for non-empty output".to_string(),
            ));
        }

        Ok(Self {
            output: response.output,
            byte_length,
        })
    }
}

/// A build as listed on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSummary {
    #[serde(alias = "ID", alias = "Id", deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default, alias = "Owner")]
    pub owner: String,

    #[serde(default, alias = "Repo")]
    pub repo: String,

    /// Branch or tag the build ran for
    #[serde(default, rename = "ref", alias = "Ref")]
    pub git_ref: String,

    #[serde(default, alias = "SHA")]
    pub sha: String,

    #[serde(default, alias = "Complete")]
    pub complete: bool,

    #[serde(default, alias = "Success")]
    pub success: bool,

    #[serde(default, alias = "Commits", deserialize_with = "null_as_empty")]
    pub commits: Vec<Commit>,

    #[serde(default, alias = "GithubURL", alias = "githubURL")]
    pub github_url: String,
}

impl BuildSummary {
    /// "owner/repo", or just the repo when the owner is unknown
    pub fn title(&self) -> String {
        if self.owner.is_empty() {
            self.repo.clone()
        } else {
            format!("{}/{}", self.owner, self.repo)
        }
    }
}

/// A commit included in a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(default, alias = "Sha")]
    pub sha: String,

    #[serde(default, alias = "Message")]
    pub message: String,

    #[serde(default, alias = "Url")]
    pub url: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid build id: {}", other))),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Commit>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Commit>>::deserialize(deserializer)?.unwrap_or_default())
}
