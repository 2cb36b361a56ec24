//! Configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Riot API configuration
    #[serde(default)]
    pub riot: RiotConfig,
    /// WebSocket server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Riot platform configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiotConfig {
    /// API key sent as `X-Riot-Token`
    #[serde(default)]
    pub api_key: Option<String>,
    /// Overrides the regional host (`https://{region}.api.riotgames.com`).
    /// Mostly useful for pointing at a mock server.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// WebSocket server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the push-channel listener binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:3001".to_string()
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Pause between two match fetches in milliseconds
    #[serde(default = "default_match_throttle")]
    pub match_throttle_ms: u64,
    /// Wait used when a 429 carries no usable Retry-After header
    #[serde(default = "default_retry_after")]
    pub default_retry_after_seconds: u64,
    /// Maximum rate-limited attempts per match (0 = infinite)
    #[serde(default)]
    pub max_rate_limit_retries: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            request_timeout_seconds: default_request_timeout(),
            match_throttle_ms: default_match_throttle(),
            default_retry_after_seconds: default_retry_after(),
            max_rate_limit_retries: 0,
        }
    }
}

impl AppSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn match_throttle(&self) -> Duration {
        Duration::from_millis(self.match_throttle_ms)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_match_throttle() -> u64 {
    100
}

fn default_retry_after() -> u64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.match_throttle(), Duration::from_millis(100));
        assert_eq!(settings.default_retry_after_seconds, 1);
        assert_eq!(settings.max_rate_limit_retries, 0);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"riot": {"api_key": "RGAPI-test"}, "settings": {"match_throttle_ms": 0}}"#,
        )
        .unwrap();
        assert_eq!(config.riot.api_key.as_deref(), Some("RGAPI-test"));
        assert_eq!(config.server.bind_address, "0.0.0.0:3001");
        assert_eq!(config.settings.match_throttle_ms, 0);
        assert_eq!(config.settings.log_level, "info");
    }
}
