//! Report formatting for terminal output
//!
//! Renders the summary block, the statistics table and a text version of
//! the chart.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use super::number::{format_currency, format_number, format_number_with, format_tick};
use crate::config::LocaleSettings;
use crate::models::RowKind;
use crate::reports::{ChartData, RenderPayload, Summary, TableEntry, Visibility};

const BAR_WIDTH: usize = 24;
const REPORT_WIDTH: usize = 60;

/// Format the whole payload: summary, table and chart
pub fn format_report(
    payload: &RenderPayload,
    visibility: &Visibility,
    locale: &LocaleSettings,
) -> String {
    let mut output = String::new();

    output.push_str(&format_header(
        &format!("Report {} ({})", payload.range, payload.granularity),
        REPORT_WIDTH,
    ));
    output.push('\n');
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');

    match &payload.summary {
        Some(summary) => output.push_str(&format_summary(summary, locale)),
        None => output.push_str("No categories selected.\n"),
    }
    output.push('\n');

    output.push_str(&format_stats_table(&payload.table, locale));
    output.push('\n');

    if let Some(chart) = &payload.chart {
        output.push('\n');
        output.push_str(&format_chart(chart, visibility, locale));
    }

    output
}

/// Format the headline figures
pub fn format_summary(summary: &Summary, locale: &LocaleSettings) -> String {
    let per = |value: f64, unit: &str| {
        format!(
            "{} {}/{}",
            format_number(value, locale),
            locale.currency_symbol,
            unit
        )
    };
    let mut output = String::new();

    output.push_str(&format!(
        "{:<10} {:>16}  {:>18}\n",
        "Time",
        format!("{} {}", summary.months, plural(summary.months == 1, "month", "months")),
        format!(
            "{} {}",
            format_number_with(summary.years, 1, locale),
            plural(summary.years == 1.0, "year", "years")
        ),
    ));

    let rows = [
        ("Income", summary.income_per_month, summary.income_per_year),
        ("Expenses", summary.expense_per_month, summary.expense_per_year),
        ("Savings", summary.savings_per_month, summary.savings_per_year),
    ];
    for (label, monthly, yearly) in rows {
        output.push_str(&format!(
            "{:<10} {:>16}  {:>18}\n",
            label,
            per(monthly, "month"),
            per(yearly, "year")
        ));
    }

    if let Some(ratio) = summary.savings_ratio_percent {
        output.push_str(&format!(
            "{:<10} {:>16}\n",
            "",
            format!("{} %", format_number(ratio, locale))
        ));
    }

    output
}

/// Format per-row statistics as a table
pub fn format_stats_table(table: &[TableEntry], locale: &LocaleSettings) -> String {
    if table.is_empty() {
        return "No categories with records.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record([
        "Category".to_string(),
        format!("Average ({}/month)", locale.currency_symbol),
        format!("Total ({})", locale.currency_symbol),
        format!("Min ({})", locale.currency_symbol),
        format!("Max ({})", locale.currency_symbol),
    ]);

    for entry in table {
        let label = match entry.row.kind {
            RowKind::Leaf => format!("  {}", entry.row.label),
            RowKind::Aggregate | RowKind::Header => entry.row.label.clone(),
        };
        let stats = &entry.presented;
        builder.push_record([
            label,
            format_number(stats.average as f64, locale),
            format_number(stats.total as f64, locale),
            format_number(stats.min as f64, locale),
            format_number(stats.max as f64, locale),
        ]);
    }

    let mut rendered = builder.build();
    rendered
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());
    rendered.to_string()
}

/// Format chart buckets as text bars, one block per bucket
pub fn format_chart(chart: &ChartData, visibility: &Visibility, locale: &LocaleSettings) -> String {
    if chart.is_empty() {
        return "No records in range.\n".to_string();
    }

    let scale = chart.recompute_scale(visibility);
    let mut output = String::new();
    let step = match scale.step_size {
        Some(step) => format_tick(step as f64, &scale, locale),
        None => "auto".to_string(),
    };
    output.push_str(&format!("Axis step: {}\n", step));

    let visible: Vec<_> = chart
        .datasets
        .iter()
        .enumerate()
        .filter(|(index, _)| visibility.is_visible(*index))
        .map(|(_, series)| series)
        .collect();

    let max_value = visible
        .iter()
        .flat_map(|series| series.points.iter())
        .copied()
        .max()
        .unwrap_or(0) as f64;

    for (bucket, label) in chart.labels.iter().enumerate() {
        output.push_str(&format!("{}\n", label));
        for series in &visible {
            let value = series.points.get(bucket).copied().unwrap_or(0);
            output.push_str(&format!(
                "  {:<9}{} {:>12}\n",
                series.label,
                format_bar(value as f64, max_value, BAR_WIDTH),
                format_tick(value as f64, &scale, locale)
            ));
        }
    }

    output
}

fn plural<'a>(singular: bool, one: &'a str, many: &'a str) -> &'a str {
    if singular {
        one
    } else {
        many
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a header line with padding
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = if len >= width { 0 } else { (width - len) / 2 };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}
