//! Amount type for signed ledger values
//!
//! The monthly ledger stores `importe` as a floating point column: negative
//! values are expenses, positive values income. Presentation always goes
//! through one of the whole-number conversions below, which fix the
//! rounding direction per figure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Neg, Sub};

/// A signed monetary amount as stored in the monthly ledger
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount from a raw ledger value
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Get the raw value
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Check if the amount is income
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Check if the amount is an expense
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Round toward negative infinity (expense totals, minimums)
    pub fn floor_whole(&self) -> i64 {
        self.0.floor() as i64
    }

    /// Round toward positive infinity (income totals, maximums)
    pub fn ceil_whole(&self) -> i64 {
        self.0.ceil() as i64
    }

    /// Round to nearest, halves toward positive infinity (savings, totals)
    pub fn round_whole(&self) -> i64 {
        round_half_up(self.0) as i64
    }
}

/// Nearest-integer rounding where `x.5` goes up for both signs
///
/// `f64::round` sends `-2.5` to `-3`; the report figures need `-2`.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Div<f64> for Amount {
    type Output = Self;

    fn div(self, divisor: f64) -> Self {
        Self(self.0 / divisor)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_floor_and_income_ceil() {
        // expenses are presented negated then floored, income ceiled
        assert_eq!(Amount::new(1234.7).floor_whole(), 1234);
        assert_eq!(Amount::new(1234.2).ceil_whole(), 1235);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(Amount::new(2.5).round_whole(), 3);
        assert_eq!(Amount::new(-2.5).round_whole(), -2);
        assert_eq!(Amount::new(-2.6).round_whole(), -3);
        assert_eq!(Amount::new(0.49999999999999994).round_whole(), 0);
    }

    #[test]
    fn test_negative_floor_and_ceil() {
        assert_eq!(Amount::new(-10.2).floor_whole(), -11);
        assert_eq!(Amount::new(-10.8).ceil_whole(), -10);
    }

    #[test]
    fn test_arithmetic() {
        let a = Amount::new(100.0);
        let b = Amount::new(40.0);

        assert_eq!((a + b).value(), 140.0);
        assert_eq!((a - b).value(), 60.0);
        assert_eq!((-a).value(), -100.0);
        assert_eq!((a / 4.0).value(), 25.0);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Amount::zero().is_zero());
        assert!(Amount::new(1.0).is_positive());
        assert!(Amount::new(-1.0).is_negative());
        assert_eq!(Amount::new(-3.0).abs(), Amount::new(3.0));
    }

    #[test]
    fn test_sum() {
        let total: Amount = vec![Amount::new(-50.0), Amount::new(120.5), Amount::new(-0.5)]
            .into_iter()
            .sum();
        assert_eq!(total.value(), 70.0);
    }

    #[test]
    fn test_serialization() {
        let amount = Amount::new(-12.5);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "-12.5");
    }
}
