//! Range statistics and bucketed series over the monthly ledger
//!
//! Figures are kept raw here; the whole-number rounding of each figure is a
//! presentation step (`RangeStats::presented`, chart series assembly).

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::models::{Amount, CategorySelection, DateRange};
use crate::reports::granularity::Granularity;
use crate::store::{BucketTotals, FlowTotals, MonthlyQuery, MonthlyStore};

/// Min, max, total and monthly average over a range and selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeStats {
    pub min: Amount,
    pub max: Amount,
    pub total: Amount,
    pub average: Amount,
    /// Month count the average was divided by
    pub months: i64,
}

impl RangeStats {
    /// Whole-number figures for display
    pub fn presented(&self) -> PresentedStats {
        PresentedStats {
            min: self.min.floor_whole(),
            max: self.max.ceil_whole(),
            total: self.total.round_whole(),
            average: self.average.round_whole(),
        }
    }
}

/// Rounded statistics: min floored, max ceiled, total and average rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentedStats {
    pub min: i64,
    pub max: i64,
    pub total: i64,
    pub average: i64,
}

/// Runs report queries against a store
pub struct AggregationEngine<'a, S: MonthlyStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: MonthlyStore + ?Sized> AggregationEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    /// Statistics of one selection over a range
    ///
    /// The selection must not be empty. Months without records count toward
    /// the average's denominator; a range with no records yields zeros.
    pub fn range_stats(
        &self,
        range: &DateRange,
        selection: &CategorySelection,
    ) -> ReportResult<RangeStats> {
        let query = MonthlyQuery::for_selection(*range, selection).ok_or_else(|| {
            ReportError::Validation("range statistics need at least one subcategory".into())
        })?;

        let months = checked_months(range)?;
        let totals = self.store.range_totals(&query)?;
        let total = totals.sum.unwrap_or_default();

        Ok(RangeStats {
            min: totals.min.unwrap_or_default(),
            max: totals.max.unwrap_or_default(),
            total,
            average: total / months as f64,
            months,
        })
    }

    /// Expense and income sums over the whole range
    ///
    /// `None` when the selection is empty.
    pub fn flow_totals(
        &self,
        range: &DateRange,
        selection: &CategorySelection,
    ) -> ReportResult<Option<FlowTotals>> {
        match MonthlyQuery::for_selection(*range, selection) {
            Some(query) => Ok(Some(self.store.flow_totals(&query)?)),
            None => Ok(None),
        }
    }

    /// Expense and income sums per bucket, ascending by bucket label
    ///
    /// An empty selection produces no buckets and issues no query.
    pub fn bucketed_series(
        &self,
        range: &DateRange,
        selection: &CategorySelection,
        granularity: Granularity,
    ) -> ReportResult<Vec<BucketTotals>> {
        match MonthlyQuery::for_selection(*range, selection) {
            Some(query) => self.store.bucket_totals(&query, granularity),
            None => Ok(Vec::new()),
        }
    }
}

/// Month count of a range, rejecting spans that cannot be divided by
pub fn checked_months(range: &DateRange) -> ReportResult<i64> {
    let months = range.months();
    if months <= 0 {
        return Err(ReportError::InvalidRange(format!(
            "{} spans {} months",
            range, months
        )));
    }
    Ok(months)
}
