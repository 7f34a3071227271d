//! Bucket width selection for chart series
//!
//! Longer ranges are grouped into wider, calendar-aligned windows so the
//! number of chart categories stays bounded.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::YearMonth;

/// Bucket width policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    /// One bucket per ledger month (`2024-03`)
    Month,
    /// Three-month windows (`2024-T1`)
    Quarter,
    /// Four-month windows (`2024-C1`)
    FourMonth,
    /// Six-month windows (`2024-S1`)
    Semester,
    /// One bucket per year (`2024`)
    Year,
}

/// Inclusive upper month-count bound of each granularity, checked in order
const THRESHOLDS: [(i64, Granularity); 4] = [
    (18, Granularity::Month),
    (36, Granularity::Quarter),
    (48, Granularity::FourMonth),
    (72, Granularity::Semester),
];

impl Granularity {
    /// Pick the granularity for a span of `month_count` months
    ///
    /// Total over all integers: anything up to 18 (including zero or a
    /// negative count) is per-month, anything past 72 is per-year.
    pub fn for_month_count(month_count: i64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(limit, _)| month_count <= *limit)
            .map(|(_, granularity)| *granularity)
            .unwrap_or(Granularity::Year)
    }

    /// Window size in months for calendar-aligned windows
    pub fn window_size(&self) -> Option<u32> {
        match self {
            Granularity::Quarter => Some(3),
            Granularity::FourMonth => Some(4),
            Granularity::Semester => Some(6),
            Granularity::Month | Granularity::Year => None,
        }
    }

    /// Letter marking the window kind inside bucket labels
    pub fn code(&self) -> Option<char> {
        match self {
            Granularity::Quarter => Some('T'),
            Granularity::FourMonth => Some('C'),
            Granularity::Semester => Some('S'),
            Granularity::Month | Granularity::Year => None,
        }
    }

    /// Bucket label for a ledger month
    pub fn bucket_label(&self, month: &YearMonth) -> String {
        match (self.window_size(), self.code()) {
            (Some(size), Some(code)) => format!(
                "{:04}-{}{}",
                month.year(),
                code,
                month.month_index() / size + 1
            ),
            _ => match self {
                Granularity::Year => format!("{:04}", month.year()),
                _ => month.ledger_key(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::FourMonth => "four-month",
            Granularity::Semester => "semester",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        YearMonth::parse(s).unwrap()
    }

    #[test]
    fn test_threshold_boundaries() {
        let counts = [18, 19, 36, 37, 48, 49, 72, 73];
        let expected = [
            Granularity::Month,
            Granularity::Quarter,
            Granularity::Quarter,
            Granularity::FourMonth,
            Granularity::FourMonth,
            Granularity::Semester,
            Granularity::Semester,
            Granularity::Year,
        ];
        let selected: Vec<_> = counts.iter().map(|c| Granularity::for_month_count(*c)).collect();
        assert_eq!(selected, expected);
    }

    #[test]
    fn test_small_and_degenerate_counts_are_monthly() {
        assert_eq!(Granularity::for_month_count(0), Granularity::Month);
        assert_eq!(Granularity::for_month_count(1), Granularity::Month);
        assert_eq!(Granularity::for_month_count(-4), Granularity::Month);
        assert_eq!(Granularity::for_month_count(600), Granularity::Year);
    }

    #[test]
    fn test_bucket_labels() {
        let march = ym("2024-03");
        assert_eq!(Granularity::Month.bucket_label(&march), "2024-03");
        assert_eq!(Granularity::Quarter.bucket_label(&march), "2024-T1");
        assert_eq!(Granularity::FourMonth.bucket_label(&march), "2024-C1");
        assert_eq!(Granularity::Semester.bucket_label(&march), "2024-S1");
        assert_eq!(Granularity::Year.bucket_label(&march), "2024");
    }

    #[test]
    fn test_windows_align_to_calendar_year() {
        assert_eq!(Granularity::Quarter.bucket_label(&ym("2024-04")), "2024-T2");
        assert_eq!(Granularity::Quarter.bucket_label(&ym("2024-12")), "2024-T4");
        assert_eq!(Granularity::FourMonth.bucket_label(&ym("2024-05")), "2024-C2");
        assert_eq!(Granularity::FourMonth.bucket_label(&ym("2024-09")), "2024-C3");
        assert_eq!(Granularity::Semester.bucket_label(&ym("2024-07")), "2024-S2");
    }

    #[test]
    fn test_labels_ignore_day() {
        assert_eq!(Granularity::Month.bucket_label(&ym("2024-03-20")), "2024-03");
    }
}
