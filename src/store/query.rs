//! Typed description of a filtered ledger query
//!
//! Stores turn a `MonthlyQuery` into their own access path; ids and months
//! travel as typed values, never as query text.

use crate::models::{CategorySelection, DateRange, MonthlyRecord, SubcategoryId};

/// Subcategory restriction of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubcategoryFilter {
    /// Equality against a single id
    One(SubcategoryId),
    /// Membership in two or more ids, ascending
    Many(Vec<SubcategoryId>),
}

impl SubcategoryFilter {
    /// Build the filter for a selection; `None` when nothing is selected
    pub fn from_selection(selection: &CategorySelection) -> Option<Self> {
        let ids: Vec<SubcategoryId> = selection.iter().collect();
        match ids.as_slice() {
            [] => None,
            [only] => Some(Self::One(*only)),
            _ => Some(Self::Many(ids)),
        }
    }

    pub fn matches(&self, id: SubcategoryId) -> bool {
        match self {
            Self::One(only) => *only == id,
            Self::Many(ids) => ids.binary_search(&id).is_ok(),
        }
    }

    pub fn ids(&self) -> &[SubcategoryId] {
        match self {
            Self::One(only) => std::slice::from_ref(only),
            Self::Many(ids) => ids,
        }
    }
}

/// Records within an inclusive month range and a subcategory filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyQuery {
    pub range: DateRange,
    pub filter: SubcategoryFilter,
}

impl MonthlyQuery {
    pub fn new(range: DateRange, filter: SubcategoryFilter) -> Self {
        Self { range, filter }
    }

    /// Query for a selection; `None` when the selection is empty
    pub fn for_selection(range: DateRange, selection: &CategorySelection) -> Option<Self> {
        SubcategoryFilter::from_selection(selection).map(|filter| Self::new(range, filter))
    }

    /// `YYYY-MM` lower bound compared against the ledger's month key
    pub fn start_key(&self) -> String {
        self.range.start.ledger_key()
    }

    /// `YYYY-MM` upper bound compared against the ledger's month key
    pub fn end_key(&self) -> String {
        self.range.end.ledger_key()
    }

    pub fn matches(&self, record: &MonthlyRecord) -> bool {
        self.range.contains(&record.month) && self.filter.matches(record.subcategory_id)
    }
}
