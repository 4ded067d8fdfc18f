//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! control client. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the control client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ControlConfig {
    /// Daemon endpoint settings.
    pub api: ApiConfig,

    /// Deadline settings.
    pub timeouts: TimeoutConfig,

    /// Platform dispatch settings.
    pub platform: PlatformConfig,
}

/// Daemon endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the daemon's management API
    /// (e.g., "http://127.0.0.1:9090").
    pub base_url: String,

    /// Optional bearer secret; sent as `Authorization: Bearer <secret>`
    /// on every request when set.
    pub secret: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9090".to_string(),
            secret: None,
        }
    }
}

/// Deadline configuration, in seconds. Zero disables a deadline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment deadline.
    pub connect_secs: u64,

    /// Total deadline for one-shot exchanges.
    pub request_secs: u64,

    /// Per-pull deadline for keep-alive streams. Disabled by default;
    /// a quiet log stream is not an error.
    pub stream_pull_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
            stream_pull_secs: 0,
        }
    }
}

/// Platform dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PlatformConfig {
    /// Override for the detected platform identifier. Normally unset;
    /// resolution then uses `std::env::consts::OS`.
    pub id: Option<String>,
}

impl PlatformConfig {
    /// The effective platform identifier.
    pub fn effective_id(&self) -> &str {
        self.id.as_deref().unwrap_or(std::env::consts::OS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_valid() {
        let config: ControlConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:9090");
        assert_eq!(config.api.secret, None);
        assert_eq!(config.timeouts.connect_secs, 5);
        assert_eq!(config.platform.effective_id(), std::env::consts::OS);
    }

    #[test]
    fn test_partial_override() {
        let config: ControlConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://10.0.0.2:9097"
            secret = "hunter2"

            [timeouts]
            request_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.2:9097");
        assert_eq!(config.api.secret.as_deref(), Some("hunter2"));
        assert_eq!(config.timeouts.request_secs, 3);
        assert_eq!(config.timeouts.connect_secs, 5);
    }

    #[test]
    fn test_platform_override() {
        let config: ControlConfig = toml::from_str("[platform]\nid = \"linux-musl\"").unwrap();
        assert_eq!(config.platform.effective_id(), "linux-musl");
    }
}
