//! Report assembly
//!
//! Ties month counting, granularity selection, aggregation and axis scaling
//! together into one immutable render payload.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ReportResult;
use crate::models::amount::round_half_up;
use crate::models::{CategoryRow, CategorySelection, DateRange};
use crate::reports::aggregation::{checked_months, AggregationEngine, PresentedStats, RangeStats};
use crate::reports::chart::ChartData;
use crate::reports::granularity::Granularity;
use crate::store::{FlowTotals, MonthlyStore};

/// What the user asked for
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub range: DateRange,
    pub selection: CategorySelection,
}

impl ReportRequest {
    pub fn new(range: DateRange, selection: CategorySelection) -> Self {
        Self { range, selection }
    }
}

/// Headline figures over the whole range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub months: i64,
    /// Months over twelve, rounded to one decimal
    pub years: f64,
    pub income_per_month: f64,
    pub income_per_year: f64,
    pub expense_per_month: f64,
    pub expense_per_year: f64,
    pub savings_per_month: f64,
    pub savings_per_year: f64,
    /// Share of income kept; `None` without income
    pub savings_ratio_percent: Option<f64>,
}

impl Summary {
    pub fn from_flows(months: i64, flows: &FlowTotals) -> Self {
        let years = years_for(months);
        let income = flows.income.value();
        let expenses = flows.expenses.value();
        let savings = income - expenses;
        let months_f = months as f64;

        let savings_ratio_percent = if flows.income.is_zero() {
            None
        } else {
            Some((1.0 - expenses / income) * 100.0)
        };

        Self {
            months,
            years,
            income_per_month: income / months_f,
            income_per_year: income / years,
            expense_per_month: expenses / months_f,
            expense_per_year: expenses / years,
            savings_per_month: savings / months_f,
            savings_per_year: savings / years,
            savings_ratio_percent,
        }
    }
}

/// Month count expressed in years with one decimal
pub fn years_for(months: i64) -> f64 {
    round_half_up(months as f64 / 12.0 * 10.0) / 10.0
}

/// Statistics of one table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub row: CategoryRow,
    pub stats: RangeStats,
    pub presented: PresentedStats,
}

/// Everything the renderer needs for one report
///
/// `summary` and `chart` are absent when nothing is selected; the table is
/// always filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPayload {
    pub range: DateRange,
    pub months: i64,
    pub granularity: Granularity,
    pub summary: Option<Summary>,
    pub table: Vec<TableEntry>,
    pub chart: Option<ChartData>,
}

impl RenderPayload {
    pub fn has_selection(&self) -> bool {
        self.summary.is_some()
    }
}

/// Builds render payloads from a store
pub struct ReportAssembler<'a, S: MonthlyStore + ?Sized> {
    engine: AggregationEngine<'a, S>,
}

impl<'a, S: MonthlyStore + ?Sized> ReportAssembler<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            engine: AggregationEngine::new(store),
        }
    }

    /// Assemble the report for `request`, with one table entry per row
    pub fn assemble(
        &self,
        request: &ReportRequest,
        rows: &[CategoryRow],
    ) -> ReportResult<RenderPayload> {
        let range = request.range;
        let months = checked_months(&range)?;
        let granularity = Granularity::for_month_count(months);
        debug!(%range, months, %granularity, "assembling report");

        let table = rows
            .iter()
            .filter(|row| !row.subcategory_ids.is_empty())
            .map(|row| {
                let stats = self.engine.range_stats(&range, &row.selection())?;
                Ok(TableEntry {
                    row: row.clone(),
                    presented: stats.presented(),
                    stats,
                })
            })
            .collect::<ReportResult<Vec<_>>>()?;

        let (summary, chart) = match self.engine.flow_totals(&range, &request.selection)? {
            Some(flows) => {
                let buckets =
                    self.engine
                        .bucketed_series(&range, &request.selection, granularity)?;
                let chart = ChartData::from_buckets(&buckets);
                info!(
                    %range,
                    %granularity,
                    buckets = buckets.len(),
                    step = ?chart.scale.step_size,
                    "report assembled"
                );
                (Some(Summary::from_flows(months, &flows)), Some(chart))
            }
            None => {
                info!(%range, "nothing selected, skipping summary and chart");
                (None, None)
            }
        };

        Ok(RenderPayload {
            range,
            months,
            granularity,
            summary,
            table,
            chart,
        })
    }
}
