//! Configuration module for Trendline
//!
//! This module provides configuration management including:
//! - base directory resolution
//! - settings persistence (default ledger, reserved category, locale)

pub mod paths;
pub mod settings;

pub use paths::TrendlinePaths;
pub use settings::{InitialBalance, LocaleSettings, Settings};
