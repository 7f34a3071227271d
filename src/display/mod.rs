//! Display formatting for terminal output
//!
//! Provides locale-aware number formatting and the text renderings of
//! reports, the category tree and the input bounds.

pub mod category;
pub mod number;
pub mod report;

pub use category::{format_bounds, format_category_tree};
pub use number::{format_currency, format_number, format_number_with, format_tick};
pub use report::{format_chart, format_report, format_stats_table, format_summary};
