//! CSV Export functionality
//!
//! Exports chart buckets and the statistics table in spreadsheet-friendly
//! form. Figures are the presented whole numbers.

use serde::Serialize;
use std::io::Write;

use crate::error::{ReportError, ReportResult};
use crate::models::RowKind;
use crate::reports::{ChartData, SeriesKind, TableEntry};

#[derive(Debug, Serialize)]
struct BucketRecord<'a> {
    label: &'a str,
    expenses: i64,
    income: i64,
    savings: i64,
}

#[derive(Debug, Serialize)]
struct TableRecord<'a> {
    category: &'a str,
    kind: RowKind,
    subcategories: String,
    average: i64,
    total: i64,
    min: i64,
    max: i64,
}

/// Export chart buckets as `label,expenses,income,savings`
pub fn export_chart_csv<W: Write>(chart: &ChartData, writer: W) -> ReportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let points = |kind: SeriesKind| {
        chart
            .series(kind)
            .map(|s| s.points.as_slice())
            .unwrap_or(&[])
    };
    let (expenses, income, savings) = (
        points(SeriesKind::Expenses),
        points(SeriesKind::Income),
        points(SeriesKind::Savings),
    );

    if chart.labels.is_empty() {
        csv_writer
            .write_record(["label", "expenses", "income", "savings"])
            .map_err(csv_error)?;
    }

    for (i, label) in chart.labels.iter().enumerate() {
        csv_writer
            .serialize(BucketRecord {
                label: label.as_str(),
                expenses: expenses.get(i).copied().unwrap_or(0),
                income: income.get(i).copied().unwrap_or(0),
                savings: savings.get(i).copied().unwrap_or(0),
            })
            .map_err(csv_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| ReportError::Export(e.to_string()))
}

/// Export per-row statistics
pub fn export_table_csv<W: Write>(table: &[TableEntry], writer: W) -> ReportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if table.is_empty() {
        csv_writer
            .write_record([
                "category",
                "kind",
                "subcategories",
                "average",
                "total",
                "min",
                "max",
            ])
            .map_err(csv_error)?;
    }

    for entry in table {
        let subcategories: Vec<String> = entry
            .row
            .subcategory_ids
            .iter()
            .map(|id| id.as_i64().to_string())
            .collect();
        csv_writer
            .serialize(TableRecord {
                category: &entry.row.label,
                kind: entry.row.kind,
                subcategories: subcategories.join(" "),
                average: entry.presented.average,
                total: entry.presented.total,
                min: entry.presented.min,
                max: entry.presented.max,
            })
            .map_err(csv_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| ReportError::Export(e.to_string()))
}

fn csv_error(e: csv::Error) -> ReportError {
    ReportError::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_payload;

    #[test]
    fn test_chart_csv() {
        let payload = sample_payload();
        let mut output = Vec::new();
        export_chart_csv(payload.chart.as_ref().unwrap(), &mut output).unwrap();

        let csv = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "label,expenses,income,savings");
        assert_eq!(lines[1], "2023-01,700,2100,1400");
        assert_eq!(lines[3], "2023-04,720,2251,1531");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_table_csv() {
        let payload = sample_payload();
        let mut output = Vec::new();
        export_table_csv(&payload.table, &mut output).unwrap();

        let csv = String::from_utf8(output).unwrap();
        assert!(csv.starts_with("category,kind,subcategories,average,total,min,max\n"));
        assert!(csv.contains("Alquiler,header,10,-530,-2120,-720,-700\n"));
    }

    #[test]
    fn test_empty_chart_still_has_header() {
        let chart = ChartData::from_buckets(&[]);
        let mut output = Vec::new();
        export_chart_csv(&chart, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "label,expenses,income,savings\n");
    }
}
