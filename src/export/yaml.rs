//! YAML Export functionality
//!
//! Writes a report as YAML for human reading.

use std::io::Write;

use crate::error::{ReportError, ReportResult};
use crate::export::json::ReportExport;
use crate::reports::RenderPayload;

/// Export a report to YAML, preceded by a comment header
pub fn export_report_yaml<W: Write>(report: &RenderPayload, writer: &mut W) -> ReportResult<()> {
    let export = ReportExport::new(report.clone());
    let export_err = |e: std::io::Error| ReportError::Export(e.to_string());

    writeln!(writer, "# Trendline Report").map_err(export_err)?;
    writeln!(writer, "# Range: {}", export.report.range).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ReportError::Export(e.to_string()))?;

    Ok(())
}

/// Read a YAML export back
pub fn import_report_yaml(yaml_str: &str) -> ReportResult<ReportExport> {
    let export: ReportExport =
        serde_yaml::from_str(yaml_str).map_err(|e| ReportError::Export(e.to_string()))?;

    export.validate().map_err(ReportError::Validation)?;

    Ok(export)
}
