//! Date input bounds
//!
//! The range inputs are limited to the months the ledger covers. The default
//! range starts at the first month with a record other than the opening
//! balance, since that record usually predates regular activity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::InitialBalance;
use crate::error::ReportResult;
use crate::models::{DateRange, YearMonth};
use crate::store::MonthlyStore;

/// Allowed input months and the initial range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBounds {
    pub min: YearMonth,
    pub max: YearMonth,
    pub default_range: DateRange,
}

impl InputBounds {
    /// Read the bounds from a store; `None` for an empty ledger
    pub fn load<S: MonthlyStore + ?Sized>(
        store: &S,
        initial_balance: &InitialBalance,
    ) -> ReportResult<Option<Self>> {
        let Some(all) = store.month_bounds(None)? else {
            return Ok(None);
        };

        let opening = store.find_subcategory(&initial_balance.label)?;
        let start = match opening {
            Some(id) => store
                .month_bounds(Some(id))?
                .map(|b| b.first)
                .unwrap_or(all.first),
            None => all.first,
        };
        debug!(min = %all.first, max = %all.last, %start, "input bounds");

        Ok(Some(Self {
            min: all.first,
            max: all.last,
            default_range: DateRange::new(start, all.last)?,
        }))
    }

    /// Clamp one user-entered month into `[min, max]`
    ///
    /// A month inside the bounds keeps its day.
    pub fn clamp(&self, month: YearMonth) -> YearMonth {
        if month < self.min {
            self.min
        } else if month > self.max {
            self.max
        } else {
            month
        }
    }

    /// Clamp optional inputs, falling back to the default range
    pub fn clamp_range(
        &self,
        start: Option<YearMonth>,
        end: Option<YearMonth>,
    ) -> ReportResult<DateRange> {
        let start = start.map_or(self.default_range.start, |m| self.clamp(m));
        let end = end.map_or(self.default_range.end, |m| self.clamp(m));
        DateRange::new(start, end)
    }
}

/// Default range of a store, if it has any records
pub fn default_range<S: MonthlyStore + ?Sized>(
    store: &S,
    initial_balance: &InitialBalance,
) -> ReportResult<Option<DateRange>> {
    Ok(InputBounds::load(store, initial_balance)?.map(|b| b.default_range))
}
