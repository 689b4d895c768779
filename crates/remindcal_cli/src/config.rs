//! Runtime configuration for the CLI.
//!
//! # Invariants
//! - Paths are resolved once at startup against the working directory.
//! - No environment variables are consulted.

use remindcal_core::default_log_level;
use std::path::{Path, PathBuf};

/// Data file name inside the working directory.
pub const DEFAULT_DATA_FILE: &str = "calendar_data.json";
/// Log directory name inside the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Settings passed explicitly to logging and the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON file holding the persisted store.
    pub data_file: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Builds the default configuration rooted at `working_dir`.
    pub fn rooted_at(working_dir: &Path) -> Self {
        Self {
            data_file: working_dir.join(DEFAULT_DATA_FILE),
            log_level: default_log_level().to_string(),
            log_dir: working_dir.join(DEFAULT_LOG_DIR),
        }
    }

    /// Builds the default configuration for the process working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        let working_dir = std::env::current_dir()?;
        Ok(Self::rooted_at(&working_dir))
    }
}
