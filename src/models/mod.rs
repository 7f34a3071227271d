//! Core data models for Trendline
//!
//! This module contains the value types of the reporting domain: ledger
//! months and ranges, amounts, category identifiers and selections.

pub mod amount;
pub mod category;
pub mod ids;
pub mod month;
pub mod range;
pub mod record;
pub mod selection;

pub use amount::Amount;
pub use category::{Category, CategoryRow, RowKind, Subcategory};
pub use ids::{CategoryId, SubcategoryId};
pub use month::{MonthParseError, YearMonth};
pub use range::DateRange;
pub use record::MonthlyRecord;
pub use selection::CategorySelection;
