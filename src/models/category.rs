//! Category and Subcategory models
//!
//! The ledger classifies every monthly total under a subcategory, and
//! subcategories roll up into categories. Report tables show one row per
//! subcategory plus an aggregate row for categories with several of them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, SubcategoryId};
use super::selection::CategorySelection;

/// A top-level category (e.g., "Vivienda", "Ocio")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Ledger identifier
    pub id: CategoryId,

    /// Display label
    pub label: String,
}

impl Category {
    pub fn new(id: CategoryId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// A subcategory belonging to exactly one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    /// Ledger identifier
    pub id: SubcategoryId,

    /// Owning category
    pub category_id: CategoryId,

    /// Display label
    pub label: String,
}

impl Subcategory {
    pub fn new(id: SubcategoryId, category_id: CategoryId, label: impl Into<String>) -> Self {
        Self {
            id,
            category_id,
            label: label.into(),
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// How a row of the statistics table relates to the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    /// A category row covering all its subcategories
    Aggregate,
    /// A subcategory row under an aggregate row
    Leaf,
    /// The only subcategory of its category, shown in its place
    Header,
}

/// One selectable row of the statistics table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub label: String,
    pub kind: RowKind,
    pub category_id: CategoryId,
    pub subcategory_ids: Vec<SubcategoryId>,
}

impl CategoryRow {
    /// The selection this row's statistics are computed over
    pub fn selection(&self) -> CategorySelection {
        self.subcategory_ids.iter().copied().collect()
    }

    pub fn is_aggregate(&self) -> bool {
        self.kind == RowKind::Aggregate
    }
}
