//! Export module for Trendline
//!
//! Writes reports in several formats:
//! - CSV: chart buckets and the statistics table (spreadsheet-compatible)
//! - JSON: the full render payload, machine-readable
//! - YAML: the full render payload, human-readable
//! - chart: the datasets a charting front end draws

pub mod chart;
pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_chart_csv, export_table_csv};
pub use chart::write_chart;
pub use json::{export_report_json, import_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_report_yaml, import_report_yaml};
