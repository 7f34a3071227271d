//! User settings for Trendline
//!
//! Manages the default ledger, the reserved initial-balance category and the
//! number formatting locale.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::TrendlinePaths;
use crate::error::ReportError;
use crate::models::CategoryId;
use crate::store::file_io::{read_json, write_json_atomic};

/// The reserved category holding opening balances
///
/// It is never selectable and its subcategory does not move the default
/// range's lower bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialBalance {
    pub category_id: CategoryId,
    /// Label of the initial-balance subcategory
    pub label: String,
}

impl Default for InitialBalance {
    fn default() -> Self {
        Self {
            category_id: CategoryId::new(-2),
            label: "Saldo inicial".to_string(),
        }
    }
}

/// Number formatting preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleSettings {
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
    /// Unit shown on axis ticks scaled to thousands
    #[serde(default = "default_thousands_suffix")]
    pub thousands_suffix: String,
}

fn default_thousands_separator() -> char {
    '.'
}

fn default_decimal_separator() -> char {
    ','
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_thousands_suffix() -> String {
    "k€".to_string()
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
            currency_symbol: default_currency(),
            thousands_suffix: default_thousands_suffix(),
        }
    }
}

/// User settings for Trendline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Ledger used when `--db` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_database: Option<PathBuf>,

    #[serde(default)]
    pub initial_balance: InitialBalance,

    #[serde(default)]
    pub locale: LocaleSettings,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_database: None,
            initial_balance: InitialBalance::default(),
            locale: LocaleSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrendlinePaths) -> Result<Self, ReportError> {
        read_json(paths.settings_file()).map_err(|e| match e {
            ReportError::Json(msg) => ReportError::Config(msg),
            other => other,
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrendlinePaths) -> Result<(), ReportError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// The ledger to open: the explicit path, the configured one, or the
    /// default location under the base directory
    pub fn database_path(&self, paths: &TrendlinePaths, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.default_database.clone())
            .unwrap_or_else(|| paths.default_database())
    }
}
