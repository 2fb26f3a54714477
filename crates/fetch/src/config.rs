use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("longbox/", env!("CARGO_PKG_VERSION"));

/// Retrieval client settings.
///
/// Durations are stored as plain integers (with their unit in the field name)
/// so they read naturally in configuration files and environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin every listing, detail and bootstrap URL is built from
    pub base_url: String,
    pub user_agent: String,
    /// Bound on each individual request attempt
    pub request_timeout_secs: u64,
    /// Total attempts per detail page, including the first
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for each further retry
    pub backoff_base_ms: u64,
    /// How long a fetched detail page is served from cache
    pub detail_cache_ttl_secs: u64,
    pub session: SessionConfig,
}
impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }

    pub fn detail_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.detail_cache_ttl_secs)
    }
}
impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: longbox_extract::BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 30,
            max_attempts: 3,
            backoff_base_ms: 1_000,
            detail_cache_ttl_secs: 4 * 24 * 60 * 60,
            session: SessionConfig::default(),
        }
    }
}

/// Session credential settings. Disabled by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub enabled: bool,
    /// How long a bootstrapped credential is reused
    pub ttl_secs: u64,
}
impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: 30 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://leagueofcomicgeeks.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.backoff_base(), Duration::from_millis(1000));
        assert_eq!(config.detail_cache_ttl(), Duration::from_secs(345_600));
        assert_eq!(config.max_attempts, 3);
        assert!(!config.session.enabled);
        assert_eq!(config.session.ttl(), Duration::from_secs(1800));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"max_attempts": 5, "session": {"enabled": true}}"#).unwrap();
        assert_eq!(config.max_attempts, 5);
        assert!(config.session.enabled);
        assert_eq!(config.session.ttl_secs, 1800);
        assert_eq!(config.request_timeout_secs, 30);
    }
}
