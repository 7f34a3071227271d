//! Trendline - period reports over a monthly personal-finance ledger
//!
//! Given a ledger of monthly subcategory totals, Trendline reports range
//! statistics per category and a time-bucketed chart of expenses, income
//! and savings whose bucket width adapts to the length of the range.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Value types (months, ranges, amounts, categories)
//! - `store`: Read-only ledger access (SQLite and in-memory)
//! - `reports`: Month spans, granularity, aggregation, axis scaling, assembly
//! - `services`: Category tree and date input bounds
//! - `display`: Terminal rendering
//! - `export`: JSON, YAML, CSV and chart output
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use trendline::config::{Settings, TrendlinePaths};
//! use trendline::reports::{ReportAssembler, ReportRequest};
//! use trendline::services::{CategoryTree, InputBounds};
//!
//! let paths = TrendlinePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = trendline::store::open(&settings.database_path(&paths, None))?;
//! let tree = CategoryTree::load(store.as_ref(), &settings.initial_balance)?;
//! let bounds = InputBounds::load(store.as_ref(), &settings.initial_balance)?.unwrap();
//! let request = ReportRequest::new(bounds.default_range, tree.all_selection());
//! let payload = ReportAssembler::new(store.as_ref()).assemble(&request, tree.rows())?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod store;

pub use error::{ReportError, ReportResult};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber, once
///
/// Events go to standard error. `RUST_LOG` is honoured; `verbose` raises
/// this crate's level from info to debug.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let directive = if verbose {
            "trendline=debug"
        } else {
            "trendline=info"
        };
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
