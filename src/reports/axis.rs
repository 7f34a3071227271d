//! Value axis step selection
//!
//! Picks a tick step from the values of the visible series. A candidate step
//! wins when more values exceed it than an average series holds; when none
//! wins the renderer chooses its own step.

use serde::{Deserialize, Serialize};

use crate::reports::chart::{ChartSeries, Visibility};

/// Steps tried in order, largest first
pub const CANDIDATE_STEPS: [i64; 2] = [10_000, 1_000];

/// Active axis configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisScale {
    /// `None` defers to the renderer's automatic step
    pub step_size: Option<i64>,
}

impl AxisScale {
    /// Ticks are shown in thousands for steps that are whole thousands
    pub fn is_thousands(&self) -> bool {
        matches!(self.step_size, Some(step) if step >= 1000 && step % 1000 == 0)
    }
}

pub struct AxisScaler;

impl AxisScaler {
    /// Step for the flattened `visible` values
    ///
    /// `series_count` is the number of series on the chart, hidden ones
    /// included; the per-series average is taken over all of them.
    pub fn step_size(visible: &[&[i64]], series_count: usize) -> Option<i64> {
        if series_count == 0 {
            return None;
        }

        let value_count: usize = visible.iter().map(|values| values.len()).sum();
        let average_per_series = value_count as f64 / series_count as f64;

        CANDIDATE_STEPS.into_iter().find(|&step| {
            let exceeding = visible
                .iter()
                .flat_map(|values| values.iter())
                .filter(|&&value| value > step)
                .count();
            exceeding as f64 > average_per_series
        })
    }

    /// Scale for a dataset list under optional visibility
    ///
    /// Without visibility every series counts as visible.
    pub fn scale_for(datasets: &[ChartSeries], visibility: Option<&Visibility>) -> AxisScale {
        let visible: Vec<&[i64]> = datasets
            .iter()
            .enumerate()
            .filter(|(index, _)| visibility.map_or(true, |v| v.is_visible(*index)))
            .map(|(_, series)| series.points.as_slice())
            .collect();

        AxisScale {
            step_size: Self::step_size(&visible, datasets.len()),
        }
    }
}
