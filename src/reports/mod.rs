//! Temporal aggregation and report assembly
//!
//! The pipeline runs leaves first:
//!
//! - `month_span`: inclusive month count between two dates
//! - `granularity`: bucket width for a month count
//! - `aggregation`: range statistics and bucketed series from a store
//! - `axis` / `chart`: chart datasets and their tick step
//! - `assembler`: the render payload tying the above together

pub mod aggregation;
pub mod assembler;
pub mod axis;
pub mod chart;
pub mod granularity;
pub mod month_span;

pub use aggregation::{AggregationEngine, PresentedStats, RangeStats};
pub use assembler::{RenderPayload, ReportAssembler, ReportRequest, Summary, TableEntry};
pub use axis::{AxisScale, AxisScaler, CANDIDATE_STEPS};
pub use chart::{ChartData, ChartSeries, ColorToken, SeriesKind, Visibility};
pub use granularity::Granularity;
pub use month_span::{month_span, months_between};
