//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the reports and services.

pub mod category;
pub mod report;

pub use category::{handle_bounds_command, handle_categories_command};
pub use report::{handle_report_command, ReportArgs, ReportFormat};

use std::path::PathBuf;
use tracing::debug;

use crate::config::{Settings, TrendlinePaths};
use crate::error::ReportResult;
use crate::store::{self, MonthlyStore};

/// Resolved paths and settings shared by every command
#[derive(Debug, Clone)]
pub struct CliContext {
    pub paths: TrendlinePaths,
    pub settings: Settings,
    /// Ledger given on the command line, if any
    pub database: Option<PathBuf>,
}

impl CliContext {
    pub fn new(paths: TrendlinePaths, settings: Settings, database: Option<PathBuf>) -> Self {
        Self {
            paths,
            settings,
            database,
        }
    }

    /// The ledger path after applying `--db` and the settings
    pub fn database_path(&self) -> PathBuf {
        self.settings
            .database_path(&self.paths, self.database.clone())
    }

    pub fn open_store(&self) -> ReportResult<Box<dyn MonthlyStore>> {
        let path = self.database_path();
        debug!(path = %path.display(), "opening ledger");
        store::open(&path)
    }
}
