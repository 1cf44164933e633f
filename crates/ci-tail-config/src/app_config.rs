//! Application configuration
//!
//! Configuration loaded from .ci-tail.toml, with environment and
//! command-line overrides applied on top by the binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable that overrides `server_url`
pub const SERVER_ENV_VAR: &str = "CI_TAIL_SERVER";

/// Application configuration loaded from .ci-tail.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the CI server (e.g., "http://ci.internal:8080")
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Delay between two log polls, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Delay between two build list polls, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub dashboard_poll_interval_ms: u64,

    /// Per-request timeout in milliseconds; 0 disables it
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            poll_interval_ms: default_poll_interval_ms(),
            dashboard_poll_interval_ms: default_poll_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {:#}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Load config from an explicit file; errors are fatal here
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = crate::load_config_from(path)?;
        Self::parse(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Parse TOML config content
    pub fn parse(content: &str) -> Result<Self> {
        let config = toml::from_str(content)?;
        Ok(config)
    }

    /// Apply `CI_TAIL_SERVER` if it is set and non-empty
    pub fn apply_env(&mut self) {
        if let Ok(server) = std::env::var(SERVER_ENV_VAR) {
            self.apply_server_override(Some(server));
        }
    }

    /// Replace the server URL unless the override is empty
    pub fn apply_server_override(&mut self, server: Option<String>) {
        if let Some(server) = server.filter(|s| !s.trim().is_empty()) {
            log::debug!("Server URL overridden: {}", server);
            self.server_url = server;
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn dashboard_poll_interval(&self) -> Duration {
        Duration::from_millis(self.dashboard_poll_interval_ms)
    }

    /// Per-request timeout, `None` when disabled
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_url, "http://localhost:8080");
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.dashboard_poll_interval(), Duration::from_secs(1));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            server_url = "http://ci.test:9000"
            poll_interval_ms = 250
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.server_url, "http://ci.test:9000");
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        // Other fields should use defaults
        assert_eq!(config.dashboard_poll_interval_ms, 1000);
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = AppConfig::parse("request_timeout_ms = 0").unwrap();
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_invalid_config() {
        assert!(AppConfig::parse("poll_interval_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_server_override() {
        let mut config = AppConfig::default();
        config.apply_server_override(Some("  ".to_string()));
        assert_eq!(config.server_url, "http://localhost:8080");

        config.apply_server_override(None);
        assert_eq!(config.server_url, "http://localhost:8080");

        config.apply_server_override(Some("http://ci.test".to_string()));
        assert_eq!(config.server_url, "http://ci.test");
    }
}
