//! Client configuration model.
//!
//! Mirrors `~/.config/kairos/config.toml`. Every field has a default so an
//! absent or partial file still yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::memory::DEFAULT_MEMORY_PRIORITY;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const CHAT_TIMEOUT_SECS: u64 = 60;
pub const MAX_MESSAGE_LENGTH: usize = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KairosConfig {
    pub api: ApiConfig,
    pub app: AppConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bound for every request except chat.
    pub default_timeout_secs: u64,
    /// Bound for `POST /chat`; generating a reply takes longer.
    pub chat_timeout_secs: u64,
    /// `limit` query parameter for history loads. `None` fetches everything.
    pub history_limit: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_timeout_secs: DEFAULT_TIMEOUT_SECS,
            chat_timeout_secs: CHAT_TIMEOUT_SECS,
            history_limit: None,
        }
    }
}

impl ApiConfig {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }

    /// Base URL without trailing slashes.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub max_message_length: usize,
    pub default_memory_priority: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_message_length: MAX_MESSAGE_LENGTH,
            default_memory_priority: DEFAULT_MEMORY_PRIORITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_expectations() {
        let config = KairosConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.default_timeout(), Duration::from_secs(30));
        assert_eq!(config.api.chat_timeout(), Duration::from_secs(60));
        assert_eq!(config.app.max_message_length, 1000);
        assert_eq!(config.app.default_memory_priority, 5);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: KairosConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://kairos.local/api/"
            history_limit = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.api.normalized_base_url(), "http://kairos.local/api");
        assert_eq!(config.api.history_limit, Some(50));
        assert_eq!(config.api.chat_timeout_secs, CHAT_TIMEOUT_SECS);
        assert_eq!(config.app, AppConfig::default());
    }
}
