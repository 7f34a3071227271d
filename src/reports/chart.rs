//! Chart datasets handed to the renderer
//!
//! Three fixed series are built from the bucketed totals. Visibility of each
//! series is tracked separately so the axis step can be recomputed on a
//! legend toggle without going back to the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReportError;
use crate::models::amount::round_half_up;
use crate::reports::axis::{AxisScale, AxisScaler};
use crate::store::BucketTotals;

/// The three fixed chart series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Expenses,
    Income,
    Savings,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 3] = [SeriesKind::Expenses, SeriesKind::Income, SeriesKind::Savings];

    /// Position of the series in the dataset list
    pub fn index(&self) -> usize {
        match self {
            Self::Expenses => 0,
            Self::Income => 1,
            Self::Savings => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Expenses => "Expenses",
            Self::Income => "Income",
            Self::Savings => "Savings",
        }
    }

    pub fn color(&self) -> ColorToken {
        match self {
            Self::Expenses => ColorToken::Red,
            Self::Income => ColorToken::Blue,
            Self::Savings => ColorToken::Green,
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SeriesKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expenses" | "expense" | "gastos" => Ok(Self::Expenses),
            "income" | "ingresos" => Ok(Self::Income),
            "savings" | "ahorro" => Ok(Self::Savings),
            other => Err(ReportError::Validation(format!(
                "unknown series '{}' (expected expenses, income or savings)",
                other
            ))),
        }
    }
}

/// Colour token the renderer maps to its palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Red,
    Blue,
    Green,
}

/// One named series of whole-number points, one per bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub kind: SeriesKind,
    pub color: ColorToken,
    /// Whether the area under the line is filled
    pub fill: bool,
    pub points: Vec<i64>,
}

impl ChartSeries {
    fn new(kind: SeriesKind, points: Vec<i64>) -> Self {
        Self {
            label: kind.label().to_string(),
            kind,
            color: kind.color(),
            fill: kind != SeriesKind::Savings,
            points,
        }
    }
}

/// Which series are currently shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    hidden: Vec<bool>,
}

impl Visibility {
    /// Every one of `series_count` series visible
    pub fn all_visible(series_count: usize) -> Self {
        Self {
            hidden: vec![false; series_count],
        }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        !self.hidden.get(index).copied().unwrap_or(false)
    }

    /// Flip one series, returning whether it is now visible
    ///
    /// `None` for an index past the end, which is left untouched.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let hidden = self.hidden.get_mut(index)?;
        *hidden = !*hidden;
        Some(!*hidden)
    }

    pub fn hide(&mut self, index: usize) {
        if let Some(hidden) = self.hidden.get_mut(index) {
            *hidden = true;
        }
    }

    pub fn series_count(&self) -> usize {
        self.hidden.len()
    }

    pub fn visible_count(&self) -> usize {
        self.hidden.iter().filter(|h| !**h).count()
    }
}

/// Labels, datasets and the active axis scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartSeries>,
    pub scale: AxisScale,
}

impl ChartData {
    /// Build the fixed series from bucketed totals
    ///
    /// Expenses are floored, income ceiled and savings rounded from the raw
    /// difference. The initial scale considers every series.
    pub fn from_buckets(buckets: &[BucketTotals]) -> Self {
        let labels = buckets.iter().map(|b| b.label.clone()).collect();
        let expenses = buckets.iter().map(|b| b.expenses.floor_whole()).collect();
        let income = buckets.iter().map(|b| b.income.ceil_whole()).collect();
        let savings = buckets
            .iter()
            .map(|b| round_half_up((b.income - b.expenses).value()) as i64)
            .collect();

        let datasets = vec![
            ChartSeries::new(SeriesKind::Expenses, expenses),
            ChartSeries::new(SeriesKind::Income, income),
            ChartSeries::new(SeriesKind::Savings, savings),
        ];

        let scale = AxisScaler::scale_for(&datasets, None);
        Self {
            labels,
            datasets,
            scale,
        }
    }

    pub fn series(&self, kind: SeriesKind) -> Option<&ChartSeries> {
        self.datasets.iter().find(|s| s.kind == kind)
    }

    /// Axis scale for the series left visible
    pub fn recompute_scale(&self, visibility: &Visibility) -> AxisScale {
        AxisScaler::scale_for(&self.datasets, Some(visibility))
    }

    /// Replace the active scale after a visibility change
    pub fn apply_visibility(&mut self, visibility: &Visibility) {
        self.scale = self.recompute_scale(visibility);
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
