//! JSON Export functionality
//!
//! Exports a render payload with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{ReportError, ReportResult};
use crate::reports::RenderPayload;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A report as written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Generation timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub report: RenderPayload,
}

impl ReportExport {
    pub fn new(report: RenderPayload) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            report,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if let Some(chart) = &self.report.chart {
            for series in &chart.datasets {
                if series.points.len() != chart.labels.len() {
                    return Err(format!(
                        "Series {} has {} points for {} labels",
                        series.label,
                        series.points.len(),
                        chart.labels.len()
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Export a report to JSON
pub fn export_report_json<W: Write>(
    report: &RenderPayload,
    writer: &mut W,
    pretty: bool,
) -> ReportResult<()> {
    let export = ReportExport::new(report.clone());

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ReportError::Export(e.to_string()))?;

    Ok(())
}

/// Read a JSON export back
pub fn import_report_json(json_str: &str) -> ReportResult<ReportExport> {
    let export: ReportExport =
        serde_json::from_str(json_str).map_err(|e| ReportError::Json(e.to_string()))?;

    export.validate().map_err(ReportError::Validation)?;

    Ok(export)
}
