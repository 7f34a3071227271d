//! Calendar month representation
//!
//! Ledger rows are keyed by `YYYY-MM`. Dates typed by a user may also carry
//! a day (`YYYY-MM-DD`); the day only matters when rounding a month span and
//! is never used to filter the ledger.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar year and month, optionally carrying the day it was typed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
    day: Option<u32>,
}

impl YearMonth {
    /// Create a month without a day component
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::MonthOutOfRange(month));
        }
        Ok(Self {
            year,
            month,
            day: None,
        })
    }

    /// Create a month carrying a day component
    ///
    /// The day is range-checked (1..=31) but not checked against the month,
    /// so `2024-02-31` is accepted verbatim.
    pub fn with_day(year: i32, month: u32, day: u32) -> Result<Self, MonthParseError> {
        if !(1..=31).contains(&day) {
            return Err(MonthParseError::DayOutOfRange(day));
        }
        let mut ym = Self::new(year, month)?;
        ym.day = Some(day);
        Ok(ym)
    }

    /// The month containing a calendar date, keeping its day
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: Some(date.day()),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-based
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> Option<u32> {
        self.day
    }

    /// Zero-based month position within the year
    pub fn month_index(&self) -> u32 {
        self.month - 1
    }

    /// The same month with the day dropped
    pub fn without_day(&self) -> Self {
        Self {
            day: None,
            ..*self
        }
    }

    /// Ordering key that ignores the day component
    pub fn month_key(&self) -> (i32, u32) {
        (self.year, self.month)
    }

    /// The `YYYY-MM` key used by the ledger's `mes` column
    pub fn ledger_key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Parse `YYYY-MM` or `YYYY-MM-DD`
    ///
    /// Surrounding whitespace is trimmed and only the first
    /// whitespace-delimited token is read.
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let token = s
            .split_whitespace()
            .next()
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        let parts = token
            .split('-')
            .map(|p| p.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        match parts.as_slice() {
            [year, month] => Self::new(to_year(*year, s)?, *month),
            [year, month, day] => Self::with_day(to_year(*year, s)?, *month, *day),
            _ => Err(MonthParseError::InvalidFormat(s.to_string())),
        }
    }
}

fn to_year(year: u32, raw: &str) -> Result<i32, MonthParseError> {
    i32::try_from(year).map_err(|_| MonthParseError::InvalidFormat(raw.to_string()))
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day {
            Some(day) => write!(f, "{:04}-{:02}-{:02}", self.year, self.month, day),
            None => write!(f, "{:04}-{:02}", self.year, self.month),
        }
    }
}

impl FromStr for YearMonth {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = MonthParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    MonthOutOfRange(u32),
    DayOutOfRange(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => {
                write!(f, "Invalid date '{}': expected YYYY-MM or YYYY-MM-DD", s)
            }
            MonthParseError::MonthOutOfRange(m) => write!(f, "Month out of range: {}", m),
            MonthParseError::DayOutOfRange(d) => write!(f, "Day out of range: {}", d),
        }
    }
}

impl std::error::Error for MonthParseError {}

impl From<MonthParseError> for crate::error::ReportError {
    fn from(err: MonthParseError) -> Self {
        Self::InvalidRange(err.to_string())
    }
}
