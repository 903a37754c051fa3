use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Polling parameters for submission watch sessions.
#[derive(Debug, Deserialize, Clone)]
pub struct PollConfig {
    /// Delay between poll attempts in milliseconds. Default: 2000.
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,
    /// Poll attempts before the session times out. Default: 20.
    #[serde(default = "default_poll_max_attempts")]
    pub max_attempts: u32,
}

fn default_poll_interval_ms() -> u64 {
    2000
}
fn default_poll_max_attempts() -> u32 {
    20
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
            max_attempts: default_poll_max_attempts(),
        }
    }
}

/// Judge-service connection settings.
#[derive(Debug, Deserialize, Clone)]
pub struct JudgeConfig {
    /// Base URL of the judge service, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds. Default: 10000.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".into()
}
fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl JudgeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub judge: JudgeConfig,
    #[serde(default)]
    pub poll: PollConfig,
}

impl ClientConfig {
    /// Load from `config/config.toml` (optional) with environment overrides
    /// (e.g., `GAVEL__JUDGE__BASE_URL`).
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config/config").required(false))
            .add_source(Environment::with_prefix("GAVEL").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.poll.interval_ms, 2000);
        assert_eq!(config.poll.max_attempts, 20);
        assert_eq!(config.judge.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ClientConfig =
            toml::from_str("[judge]\nbase_url = \"https://judge.example.com\"\n").unwrap();
        assert_eq!(config.judge.base_url, "https://judge.example.com");
        assert_eq!(config.judge.request_timeout_ms, 10_000);
        assert_eq!(config.poll.max_attempts, 20);
    }
}
