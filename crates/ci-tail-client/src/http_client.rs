//! reqwest-backed CI client
//!
//! Endpoints:
//! - `GET {server}/build/{id}/output/raw?start={n}` for log slices
//! - `GET {server}/builds` for the dashboard

use crate::client::CiClient;
use crate::error::ClientError;
use crate::types::{BuildSummary, LogChunk};
use async_trait::async_trait;
use url::Url;

const USER_AGENT: &str = concat!("ci-tail/", env!("CARGO_PKG_VERSION"));

/// Direct HTTP client for the CI server
#[derive(Debug, Clone)]
pub struct HttpCiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCiClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self { http, base_url })
    }

    /// The server this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the raw log slice starting at `start`
    pub fn log_chunk_url(&self, build_id: &str, start: u64) -> Result<Url, ClientError> {
        let mut url = self.endpoint(&["build", build_id, "output", "raw"])?;
        url.query_pairs_mut().append_pair("start", &start.to_string());
        Ok(url)
    }

    /// URL of the build list
    pub fn builds_url(&self) -> Result<Url, ClientError> {
        self.endpoint(&["builds"])
    }

    /// Human-facing URL of a build's log page, the base for shareable links
    pub fn build_page_url(&self, build_id: &str) -> Result<Url, ClientError> {
        self.endpoint(&["build", build_id, "output"])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String, ClientError> {
        log::trace!("GET {}", url);

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl CiClient for HttpCiClient {
    async fn fetch_log_chunk(&self, build_id: &str, start: u64) -> Result<LogChunk, ClientError> {
        let url = self.log_chunk_url(build_id, start)?;
        let body = self.get_text(url).await?;
        LogChunk::decode(&body)
    }

    async fn fetch_builds(&self) -> Result<Vec<BuildSummary>, ClientError> {
        let url = self.builds_url()?;
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Malformed(format!("builds: {}", e)))
    }

    fn page_url(&self, build_id: &str) -> Option<String> {
        self.build_page_url(build_id).ok().map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_log_chunk_url() {
        let client = HttpCiClient::new("http://ci.test:8080").unwrap();
        let url = client.log_chunk_url("1700-abc", 128).unwrap();
        assert_eq!(
            url.as_str(),
            "http://ci.test:8080/build/1700-abc/output/raw?start=128"
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let client = HttpCiClient::new("https://example.test/ci/").unwrap();
        assert_eq!(
            client.builds_url().unwrap().as_str(),
            "https://example.test/ci/builds"
        );
        assert_eq!(
            client.build_page_url("7").unwrap().as_str(),
            "https://example.test/ci/build/7/output"
        );
    }

    #[test]
    fn test_build_id_is_escaped() {
        let client = HttpCiClient::new("http://ci.test").unwrap();
        let url = client.log_chunk_url("a/b", 0).unwrap();
        assert_eq!(url.as_str(), "http://ci.test/build/a%2Fb/output/raw?start=0");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpCiClient::new("not a url"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            HttpCiClient::new("mailto:ci@example.test"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }
}
