//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the client configuration
//! from the configuration file (~/.config/kairos/config.toml) and layers
//! environment overrides on top.

use crate::paths::KairosPaths;
use kairos_core::config::KairosConfig;
use kairos_core::{KairosError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Overrides the backend base URL.
pub const ENV_API_URL: &str = "KAIROS_API_URL";
/// Overrides the default request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "KAIROS_TIMEOUT_SECS";
/// Overrides the chat request timeout, in seconds.
pub const ENV_CHAT_TIMEOUT_SECS: &str = "KAIROS_CHAT_TIMEOUT_SECS";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<KairosConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading the default config file.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(KairosPaths::config_file()?))
    }

    /// Creates a ConfigService reading the given file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading it on first access.
    pub fn get_config(&self) -> Result<KairosConfig> {
        {
            let cached = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let mut config = Self::load_file(&self.path)?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = Some(config.clone());
        Ok(config)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = None;
    }

    /// Reads a config file. A missing file yields the defaults.
    pub fn load_file(path: &Path) -> Result<KairosConfig> {
        if !path.exists() {
            tracing::debug!(
                "[ConfigService] No config file at {}, using defaults",
                path.display()
            );
            return Ok(KairosConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: KairosConfig = toml::from_str(&content)?;
        check_secs("api.default_timeout_secs", config.api.default_timeout_secs)?;
        check_secs("api.chat_timeout_secs", config.api.chat_timeout_secs)?;
        tracing::info!("[ConfigService] Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Applies `KAIROS_*` overrides using the given variable lookup.
pub fn apply_env_overrides<F>(config: &mut KairosConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|url| !url.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }
    if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
        config.api.default_timeout_secs = parse_secs(ENV_TIMEOUT_SECS, &secs)?;
    }
    if let Some(secs) = lookup(ENV_CHAT_TIMEOUT_SECS) {
        config.api.chat_timeout_secs = parse_secs(ENV_CHAT_TIMEOUT_SECS, &secs)?;
    }
    Ok(())
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(secs) => check_secs(key, secs).map_err(|_| non_positive(key, value)),
        Err(_) => Err(non_positive(key, value)),
    }
}

/// Timeouts of zero would fail every request immediately.
fn check_secs(key: &str, secs: u64) -> Result<u64> {
    if secs == 0 {
        return Err(non_positive(key, &secs.to_string()));
    }
    Ok(secs)
}

fn non_positive(key: &str, value: &str) -> KairosError {
    KairosError::config(format!(
        "{} must be a positive number of seconds, got '{}'",
        key, value
    ))
}
