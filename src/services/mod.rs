//! Service layer for Trendline
//!
//! Services sit between the store and the reports: they turn category
//! metadata into the selectable tree and work out the allowed date inputs.

pub mod bounds;
pub mod hierarchy;

pub use bounds::{default_range, InputBounds};
pub use hierarchy::{CategoryBranch, CategoryTree};
