//! Read-only access to the monthly ledger
//!
//! The reporting engine only ever reads. A `MonthlyStore` exposes the query
//! shapes the reports need:
//!
//! - scalar totals (min/max/sum/count, expense and income sums) over a filter
//! - sums grouped by bucket under a granularity
//! - category and subcategory metadata lookups
//! - row counts deciding whether a category has any data

pub mod file_io;
pub mod memory;
pub mod query;
pub mod sqlite;

pub use memory::{LedgerSnapshot, MemoryStore};
pub use query::{MonthlyQuery, SubcategoryFilter};
pub use sqlite::SqliteStore;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ReportResult;
use crate::models::{Amount, Category, CategoryId, Subcategory, SubcategoryId, YearMonth};
use crate::reports::granularity::Granularity;

/// Scalar statistics over a filtered set of records
///
/// `min`, `max` and `sum` are `None` when no record matched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeTotals {
    pub min: Option<Amount>,
    pub max: Option<Amount>,
    pub sum: Option<Amount>,
    pub count: u64,
}

/// Expense and income sums over a filtered set of records
///
/// `expenses` is the negated sum of negative amounts, so it is never
/// negative; `income` is the sum of positive amounts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowTotals {
    pub expenses: Amount,
    pub income: Amount,
}

impl FlowTotals {
    /// Signed net flow, `income - expenses`
    pub fn net(&self) -> Amount {
        self.income - self.expenses
    }
}

/// Expense and income sums of one bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketTotals {
    pub label: String,
    pub expenses: Amount,
    pub income: Amount,
}

/// Scope of a row count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountScope {
    /// Records of any subcategory of the category
    Category(CategoryId),
    /// Records of a single subcategory
    Subcategory(SubcategoryId),
}

/// Earliest and latest ledger months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBounds {
    pub first: YearMonth,
    pub last: YearMonth,
}

/// Read-only query surface over the monthly ledger
pub trait MonthlyStore {
    /// Min, max, sum and count of amounts matching the query
    fn range_totals(&self, query: &MonthlyQuery) -> ReportResult<RangeTotals>;

    /// Expense and income sums of amounts matching the query
    fn flow_totals(&self, query: &MonthlyQuery) -> ReportResult<FlowTotals>;

    /// Per-bucket expense and income sums, ascending by label
    ///
    /// Buckets without matching records are omitted.
    fn bucket_totals(
        &self,
        query: &MonthlyQuery,
        granularity: Granularity,
    ) -> ReportResult<Vec<BucketTotals>>;

    /// Every category, in ledger order
    fn categories(&self) -> ReportResult<Vec<Category>>;

    /// Subcategories of a category, in ledger order
    fn subcategories(&self, category: CategoryId) -> ReportResult<Vec<Subcategory>>;

    /// The subcategory with exactly this label, if any
    fn find_subcategory(&self, label: &str) -> ReportResult<Option<SubcategoryId>>;

    /// Number of records in scope
    fn count(&self, scope: CountScope) -> ReportResult<u64>;

    /// First and last months with records, optionally ignoring one
    /// subcategory; `None` for an empty ledger
    fn month_bounds(&self, excluding: Option<SubcategoryId>) -> ReportResult<Option<MonthBounds>>;
}

/// Open the ledger at `path`
///
/// `.json` files are loaded as snapshots into memory; anything else is
/// opened as a read-only SQLite database.
pub fn open(path: &Path) -> ReportResult<Box<dyn MonthlyStore>> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        Ok(Box::new(MemoryStore::load(path)?))
    } else {
        Ok(Box::new(SqliteStore::open_read_only(path)?))
    }
}
