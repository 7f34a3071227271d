//! Month counting between two dates
//!
//! Spans are inclusive of the partial end month when both dates are plain
//! months. When both carry a day, the span rounds up once more than half a
//! month (over 15 days) separates the days.

use crate::error::ReportResult;
use crate::models::YearMonth;

/// Days past which a trailing partial month counts as a full one
const HALF_MONTH_DAYS: i64 = 15;

/// Count the months between two `YYYY-MM` / `YYYY-MM-DD` strings
///
/// Fails with `InvalidRange` only on malformed input. A reversed pair yields
/// zero or a negative count; callers must not divide by it.
pub fn months_between(d1: &str, d2: &str) -> ReportResult<i64> {
    let from = YearMonth::parse(d1)?;
    let to = YearMonth::parse(d2)?;
    Ok(month_span(&from, &to))
}

/// Month count between two already-parsed dates
pub fn month_span(from: &YearMonth, to: &YearMonth) -> i64 {
    let mut months = (to.year() as i64 - from.year() as i64) * 12 - from.month() as i64
        + to.month() as i64;

    match (from.day(), to.day()) {
        (Some(day1), Some(day2)) => {
            if day2 as i64 - day1 as i64 > HALF_MONTH_DAYS {
                months += 1;
            }
        }
        // Any side without a day is read as a whole month
        _ => months += 1,
    }

    months
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_month_is_one() {
        assert_eq!(months_between("2024-01", "2024-01").unwrap(), 1);
    }

    #[test]
    fn test_plain_months_inclusive() {
        assert_eq!(months_between("2024-01", "2024-12").unwrap(), 12);
        assert_eq!(months_between("2023-11", "2024-02").unwrap(), 4);
    }

    #[test]
    fn test_day_rounding_boundary() {
        let rounded_up = months_between("2024-01-10", "2024-02-26").unwrap();
        let not_rounded = months_between("2024-01-10", "2024-02-20").unwrap();
        assert_eq!(rounded_up, 2);
        assert_eq!(not_rounded, 1);
        assert_eq!(rounded_up - not_rounded, 1);
    }

    #[test]
    fn test_exactly_fifteen_days_does_not_round() {
        assert_eq!(months_between("2024-01-01", "2024-03-16").unwrap(), 2);
        assert_eq!(months_between("2024-01-01", "2024-03-17").unwrap(), 3);
    }

    #[test]
    fn test_mixed_precision_counts_as_plain_months() {
        assert_eq!(months_between("2024-01-20", "2024-03").unwrap(), 3);
    }

    #[test]
    fn test_calendar_correctness_not_checked() {
        assert_eq!(months_between("2024-02-31", "2024-04-30").unwrap(), 2);
    }

    #[test]
    fn test_reversed_range_is_not_positive() {
        assert_eq!(months_between("2024-03", "2024-03").unwrap(), 1);
        assert_eq!(months_between("2024-03", "2024-02").unwrap(), 0);
        assert!(months_between("2024-06", "2024-01").unwrap() < 0);
    }

    #[test]
    fn test_ordered_range_is_non_negative() {
        for (a, b) in [("2020-01", "2020-01"), ("2020-05-30", "2020-06-01"), ("2019-12", "2024-01")] {
            assert!(months_between(a, b).unwrap() >= 0, "{a}..{b}");
        }
    }

    #[test]
    fn test_malformed_input_is_invalid_range() {
        let err = months_between("January", "2024-02").unwrap_err();
        assert!(err.is_invalid_range());
    }
}
