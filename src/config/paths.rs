//! Path management for Trendline
//!
//! ## Path Resolution Order
//!
//! 1. `TRENDLINE_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (`~/.config/trendline` on Linux, `%APPDATA%\trendline\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ReportError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "TRENDLINE_DATA_DIR";

/// Manages all paths used by Trendline
#[derive(Debug, Clone)]
pub struct TrendlinePaths {
    base_dir: PathBuf,
}

impl TrendlinePaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ReportError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create TrendlinePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ledger opened when neither `--db` nor the settings name one
    pub fn default_database(&self) -> PathBuf {
        self.base_dir.join("ledger.sqlite")
    }

    /// Directory chart payloads are written to by default
    pub fn charts_dir(&self) -> PathBuf {
        self.base_dir.join("charts")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ReportError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ReportError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, ReportError> {
    let dirs = ProjectDirs::from("", "", "trendline")
        .ok_or_else(|| ReportError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().to_path_buf())
}
