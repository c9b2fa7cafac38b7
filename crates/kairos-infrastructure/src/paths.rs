//! Path management for kairos configuration and log files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/kairos/            # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! ├── history.txt              # Readline input history
//! └── logs/                    # Application logs
//!     └── kairos.log.YYYY-MM-DD
//! ```

use kairos_core::{KairosError, Result};
use std::path::PathBuf;

/// Resolves kairos paths on the current platform.
pub struct KairosPaths;

impl KairosPaths {
    const APP_NAME: &'static str = "kairos";

    /// Returns the kairos configuration directory (e.g. `~/.config/kairos/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_NAME))
            .ok_or_else(|| KairosError::config("Cannot find home directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the directory for rolling log files.
    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("logs"))
    }

    /// Returns the readline history file.
    pub fn history_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("history.txt"))
    }
}
