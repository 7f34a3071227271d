//! Selectable category tree
//!
//! Builds the rows of the statistics table from the store's category
//! metadata and resolves user-supplied names or ids into a selection.

use tracing::debug;

use crate::config::InitialBalance;
use crate::error::{ReportError, ReportResult};
use crate::models::{
    Category, CategoryId, CategoryRow, CategorySelection, RowKind, Subcategory, SubcategoryId,
};
use crate::store::{CountScope, MonthlyStore};

/// Label given to catch-all subcategories
pub const OTHERS_LABEL: &str = "Otros";

const OTHERS_MARKER: &str = "(otros)";

/// A category with the subcategories that have records
#[derive(Debug, Clone)]
pub struct CategoryBranch {
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
}

/// The selectable hierarchy, in display order
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    branches: Vec<CategoryBranch>,
    rows: Vec<CategoryRow>,
}

impl CategoryTree {
    /// Load the tree from a store
    ///
    /// Categories are ordered by label and the initial-balance category is
    /// left out. Categories and subcategories without records are dropped.
    /// Catch-all subcategories are relabelled and moved last.
    pub fn load<S: MonthlyStore + ?Sized>(
        store: &S,
        initial_balance: &InitialBalance,
    ) -> ReportResult<Self> {
        let mut categories: Vec<Category> = store
            .categories()?
            .into_iter()
            .filter(|c| c.id != initial_balance.category_id)
            .collect();
        categories.sort_by(|a, b| a.label.cmp(&b.label));

        let mut branches = Vec::new();
        for category in categories {
            if store.count(CountScope::Category(category.id))? == 0 {
                debug!(category = %category.label, "skipping category without records");
                continue;
            }

            let mut subcategories = Vec::new();
            for mut sub in store.subcategories(category.id)? {
                if store.count(CountScope::Subcategory(sub.id))? == 0 {
                    continue;
                }
                if is_catch_all(&sub.label) {
                    sub.label = OTHERS_LABEL.to_string();
                }
                subcategories.push(sub);
            }
            subcategories.sort_by(|a, b| {
                (a.label == OTHERS_LABEL, &a.label).cmp(&(b.label == OTHERS_LABEL, &b.label))
            });

            if !subcategories.is_empty() {
                branches.push(CategoryBranch {
                    category,
                    subcategories,
                });
            }
        }

        Ok(Self::from_branches(branches))
    }

    /// Build a tree from already ordered branches
    pub fn from_branches(branches: Vec<CategoryBranch>) -> Self {
        let mut rows = Vec::new();
        for branch in &branches {
            let ids: Vec<SubcategoryId> = branch.subcategories.iter().map(|s| s.id).collect();

            if let [only] = branch.subcategories.as_slice() {
                rows.push(CategoryRow {
                    label: only.label.clone(),
                    kind: RowKind::Header,
                    category_id: branch.category.id,
                    subcategory_ids: vec![only.id],
                });
                continue;
            }

            rows.push(CategoryRow {
                label: branch.category.label.clone(),
                kind: RowKind::Aggregate,
                category_id: branch.category.id,
                subcategory_ids: ids,
            });
            rows.extend(branch.subcategories.iter().map(|sub| CategoryRow {
                label: sub.label.clone(),
                kind: RowKind::Leaf,
                category_id: branch.category.id,
                subcategory_ids: vec![sub.id],
            }));
        }

        Self { branches, rows }
    }

    pub fn branches(&self) -> &[CategoryBranch] {
        &self.branches
    }

    /// Table rows: an aggregate row before the leaves of each category with
    /// more than one subcategory
    pub fn rows(&self) -> &[CategoryRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every selectable subcategory
    pub fn all_selection(&self) -> CategorySelection {
        self.rows
            .iter()
            .flat_map(|row| row.subcategory_ids.iter().copied())
            .collect()
    }

    /// Resolve category and subcategory names or ids into a selection
    ///
    /// With no identifiers at all every subcategory is selected.
    pub fn selection_for(
        &self,
        categories: &[String],
        subcategories: &[String],
    ) -> ReportResult<CategorySelection> {
        if categories.is_empty() && subcategories.is_empty() {
            return Ok(self.all_selection());
        }

        let mut selection = CategorySelection::new();
        for identifier in categories {
            let branch = self
                .find_branch(identifier)
                .ok_or_else(|| ReportError::category_not_found(identifier.as_str()))?;
            selection.extend(branch.subcategories.iter().map(|s| s.id));
        }
        for identifier in subcategories {
            selection.insert(self.find_subcategory(identifier)?);
        }
        Ok(selection)
    }

    fn find_branch(&self, identifier: &str) -> Option<&CategoryBranch> {
        if let Some(branch) = self
            .branches
            .iter()
            .find(|b| b.category.label.eq_ignore_ascii_case(identifier.trim()))
        {
            return Some(branch);
        }

        let id = identifier.parse::<CategoryId>().ok()?;
        self.branches.iter().find(|b| b.category.id == id)
    }

    fn find_subcategory(&self, identifier: &str) -> ReportResult<SubcategoryId> {
        let by_label: Vec<&Subcategory> = self
            .branches
            .iter()
            .flat_map(|b| b.subcategories.iter())
            .filter(|s| s.label.eq_ignore_ascii_case(identifier.trim()))
            .collect();

        match by_label.as_slice() {
            [only] => return Ok(only.id),
            [] => {}
            many => {
                return Err(ReportError::Validation(format!(
                    "'{}' names {} subcategories; use an id instead",
                    identifier,
                    many.len()
                )))
            }
        }

        identifier
            .parse::<SubcategoryId>()
            .ok()
            .filter(|id| {
                self.branches
                    .iter()
                    .any(|b| b.subcategories.iter().any(|s| s.id == *id))
            })
            .ok_or_else(|| ReportError::subcategory_not_found(identifier))
    }
}

fn is_catch_all(label: &str) -> bool {
    label.to_lowercase().contains(OTHERS_MARKER)
}
