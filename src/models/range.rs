//! Inclusive month ranges

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::month::YearMonth;
use crate::error::{ReportError, ReportResult};
use crate::reports::month_span::month_span;

/// An inclusive `[start, end]` range of ledger months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: YearMonth,
    pub end: YearMonth,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    ///
    /// Months are compared first; days only break a tie when both bounds
    /// carry one.
    pub fn new(start: YearMonth, end: YearMonth) -> ReportResult<Self> {
        let reversed = match start.month_key().cmp(&end.month_key()) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => matches!(
                (start.day(), end.day()),
                (Some(first), Some(last)) if first > last
            ),
        };
        if reversed {
            return Err(ReportError::InvalidRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds and build the range
    pub fn parse(start: &str, end: &str) -> ReportResult<Self> {
        Self::new(YearMonth::parse(start)?, YearMonth::parse(end)?)
    }

    /// Month count of the range, day rounding included
    pub fn months(&self) -> i64 {
        month_span(&self.start, &self.end)
    }

    /// Check if a ledger month falls within the range (days ignored)
    pub fn contains(&self, month: &YearMonth) -> bool {
        let key = month.month_key();
        key >= self.start.month_key() && key <= self.end.month_key()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
