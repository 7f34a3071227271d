//! Chart payload output
//!
//! Writes the datasets a charting front end consumes. A target whose
//! directory does not exist is reported and skipped rather than created.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{error, info};

use crate::error::{ReportError, ReportResult};
use crate::reports::{AxisScale, ChartData, ChartSeries, Visibility};

#[derive(Debug, Serialize)]
struct ChartTarget<'a> {
    labels: &'a [String],
    datasets: Vec<VisibleSeries<'a>>,
    scale: AxisScale,
}

#[derive(Debug, Serialize)]
struct VisibleSeries<'a> {
    #[serde(flatten)]
    series: &'a ChartSeries,
    hidden: bool,
}

/// Write `chart` to `target` as JSON under the given visibility
///
/// Returns `Ok(false)` without writing when the target directory is
/// missing.
pub fn write_chart(chart: &ChartData, visibility: &Visibility, target: &Path) -> ReportResult<bool> {
    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if !parent.is_dir() {
        error!(target = %target.display(), "chart target directory not found, chart not written");
        return Ok(false);
    }

    let payload = ChartTarget {
        labels: &chart.labels,
        datasets: chart
            .datasets
            .iter()
            .enumerate()
            .map(|(index, series)| VisibleSeries {
                series,
                hidden: !visibility.is_visible(index),
            })
            .collect(),
        scale: chart.recompute_scale(visibility),
    };

    let file = File::create(target)
        .map_err(|e| ReportError::Export(format!("Failed to create {}: {}", target.display(), e)))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &payload)
        .map_err(|e| ReportError::Export(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| ReportError::Export(e.to_string()))?;

    info!(target = %target.display(), buckets = chart.labels.len(), "chart written");
    Ok(true)
}
