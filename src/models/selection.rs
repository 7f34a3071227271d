//! The set of subcategories a report covers

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ids::SubcategoryId;

/// Deduplicated, sorted set of checked subcategory ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySelection(BTreeSet<SubcategoryId>);

impl CategorySelection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: SubcategoryId) -> bool {
        self.0.insert(id)
    }

    pub fn extend<I: IntoIterator<Item = SubcategoryId>>(&mut self, ids: I) {
        self.0.extend(ids);
    }

    pub fn contains(&self, id: SubcategoryId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = SubcategoryId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<SubcategoryId> for CategorySelection {
    fn from_iter<I: IntoIterator<Item = SubcategoryId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates_and_sorts() {
        let selection: CategorySelection = [5, 1, 5, 3]
            .into_iter()
            .map(SubcategoryId::new)
            .collect();
        let ids: Vec<i64> = selection.iter().map(|id| id.as_i64()).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn test_empty_selection() {
        let selection = CategorySelection::new();
        assert!(selection.is_empty());
        assert!(!selection.contains(SubcategoryId::new(1)));
    }
}
