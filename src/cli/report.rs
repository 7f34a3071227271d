//! CLI command for the period report
//!
//! Resolves the range and selection from arguments, assembles the report and
//! writes it in the requested format.

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::CliContext;
use crate::display::format_report;
use crate::error::{ReportError, ReportResult};
use crate::export::{
    export_chart_csv, export_report_json, export_report_yaml, export_table_csv, write_chart,
};
use crate::models::YearMonth;
use crate::reports::{ReportAssembler, ReportRequest, SeriesKind, Visibility};
use crate::services::{CategoryTree, InputBounds};

/// Output format of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Summary, table and text chart
    #[default]
    Terminal,
    /// Full payload as JSON
    Json,
    /// Full payload as YAML
    Yaml,
    /// Chart buckets as CSV
    Csv,
    /// Statistics table as CSV
    TableCsv,
}

/// Arguments of `trendline report`
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// First month (YYYY-MM or YYYY-MM-DD); defaults to the first month
    /// after the opening balance
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last month (YYYY-MM or YYYY-MM-DD); defaults to the last ledger month
    #[arg(short, long)]
    pub end: Option<String>,

    /// Category name or ID to include (repeatable)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Subcategory name or ID to include (repeatable)
    #[arg(long = "subcategory")]
    pub subcategories: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Terminal)]
    pub format: ReportFormat,

    /// Write to a file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Hide a chart series (expenses, income, savings)
    #[arg(long = "hide")]
    pub hide: Vec<SeriesKind>,

    /// Also write the chart datasets as JSON to this file
    #[arg(long)]
    pub chart: Option<PathBuf>,
}

/// Handle the report command
pub fn handle_report_command(ctx: &CliContext, args: ReportArgs) -> ReportResult<()> {
    let store = ctx.open_store()?;
    let initial_balance = &ctx.settings.initial_balance;

    let tree = CategoryTree::load(store.as_ref(), initial_balance)?;
    let bounds = InputBounds::load(store.as_ref(), initial_balance)?
        .ok_or_else(|| ReportError::Validation("the ledger has no records".into()))?;

    let start = parse_month(args.start.as_deref())?;
    let end = parse_month(args.end.as_deref())?;
    let range = bounds.clamp_range(start, end)?;
    let selection = tree.selection_for(&args.categories, &args.subcategories)?;
    debug!(%range, selected = selection.len(), "report request");

    let request = ReportRequest::new(range, selection);
    let mut payload = ReportAssembler::new(store.as_ref()).assemble(&request, tree.rows())?;

    let mut visibility = Visibility::all_visible(SeriesKind::ALL.len());
    for kind in &args.hide {
        visibility.hide(kind.index());
    }
    if let Some(chart) = payload.chart.as_mut() {
        chart.apply_visibility(&visibility);
    }

    if args.format == ReportFormat::Csv && payload.chart.is_none() {
        return Err(ReportError::Validation(
            "no categories selected, there is no chart to export".into(),
        ));
    }

    {
        let mut writer = open_output(args.output.as_deref())?;
        match args.format {
            ReportFormat::Terminal => {
                let text = format_report(&payload, &visibility, &ctx.settings.locale);
                writeln!(writer, "{}", text)?;
            }
            ReportFormat::Json => {
                export_report_json(&payload, &mut writer, true)?;
                writeln!(writer)?;
            }
            ReportFormat::Yaml => export_report_yaml(&payload, &mut writer)?,
            ReportFormat::Csv => {
                if let Some(chart) = &payload.chart {
                    export_chart_csv(chart, &mut writer)?;
                }
            }
            ReportFormat::TableCsv => export_table_csv(&payload.table, &mut writer)?,
        }
        writer.flush()?;
    }

    if let Some(path) = &args.output {
        println!("Report exported to: {}", path.display());
    }

    if let Some(target) = &args.chart {
        match &payload.chart {
            Some(chart) => {
                if write_chart(chart, &visibility, target)? {
                    println!("Chart written to: {}", target.display());
                }
            }
            None => warn!("no categories selected, chart not written"),
        }
    }

    Ok(())
}

fn parse_month(value: Option<&str>) -> ReportResult<Option<YearMonth>> {
    value
        .map(|s| YearMonth::parse(s).map_err(ReportError::from))
        .transpose()
}

fn open_output(path: Option<&Path>) -> ReportResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                ReportError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, TrendlinePaths};
    use crate::store::memory::tests::sample_store;
    use tempfile::TempDir;

    fn context(temp_dir: &TempDir) -> CliContext {
        let ledger = temp_dir.path().join("ledger.json");
        sample_store().save(&ledger).unwrap();
        CliContext::new(
            TrendlinePaths::with_base_dir(temp_dir.path().to_path_buf()),
            Settings::default(),
            Some(ledger),
        )
    }

    #[test]
    fn test_report_to_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let output = temp_dir.path().join("report.json");

        handle_report_command(
            &ctx,
            ReportArgs {
                format: ReportFormat::Json,
                output: Some(output.clone()),
                categories: vec!["Vivienda".into()],
                ..Default::default()
            },
        )
        .unwrap();

        let export =
            crate::export::import_report_json(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(export.report.range.to_string(), "2023-01..2023-04");
        assert_eq!(export.report.table.len(), 4);
        assert!(export.report.chart.is_some());
    }

    #[test]
    fn test_report_hidden_series_rescale() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let output = temp_dir.path().join("buckets.csv");
        let chart = temp_dir.path().join("chart.json");

        handle_report_command(
            &ctx,
            ReportArgs {
                format: ReportFormat::Csv,
                output: Some(output.clone()),
                hide: vec![SeriesKind::Income, SeriesKind::Savings],
                chart: Some(chart.clone()),
                ..Default::default()
            },
        )
        .unwrap();

        let csv = std::fs::read_to_string(&output).unwrap();
        assert!(csv.starts_with("label,expenses,income,savings\n"));
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&chart).unwrap()).unwrap();
        // expenses alone stay under 1000
        assert_eq!(written["scale"]["step_size"], serde_json::Value::Null);
    }

    #[test]
    fn test_report_rejects_malformed_month() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);

        let err = handle_report_command(
            &ctx,
            ReportArgs {
                start: Some("2023-13".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(err.is_invalid_range());
    }

    #[test]
    fn test_csv_without_selection_leaves_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);

        // only the opening balance has records, so nothing is selectable
        let mut snapshot = sample_store().snapshot().clone();
        snapshot
            .records
            .retain(|r| r.subcategory_id == crate::models::SubcategoryId::new(99));
        let ledger = temp_dir.path().join("opening.json");
        crate::store::MemoryStore::new(snapshot)
            .unwrap()
            .save(&ledger)
            .unwrap();
        let opening_ctx = CliContext::new(ctx.paths.clone(), Settings::default(), Some(ledger));

        let output = temp_dir.path().join("buckets.csv");
        let err = handle_report_command(
            &opening_ctx,
            ReportArgs {
                format: ReportFormat::Csv,
                output: Some(output.clone()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_empty_ledger_fails() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);

        let empty_ledger = temp_dir.path().join("empty.json");
        crate::store::MemoryStore::new(Default::default())
            .unwrap()
            .save(&empty_ledger)
            .unwrap();
        let empty_ctx = CliContext::new(ctx.paths.clone(), Settings::default(), Some(empty_ledger));

        let err = handle_report_command(&empty_ctx, ReportArgs::default()).unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
    }
}
