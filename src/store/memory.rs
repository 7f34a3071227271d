//! In-process ledger store
//!
//! Holds a whole ledger snapshot in memory. Snapshots are plain JSON, which
//! makes this store convenient for fixtures and small exported ledgers.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::debug;

use super::file_io::{read_json_required, write_json_atomic};
use super::{
    BucketTotals, CountScope, FlowTotals, MonthBounds, MonthlyQuery, MonthlyStore, RangeTotals,
};
use crate::error::{ReportError, ReportResult};
use crate::models::{Amount, Category, CategoryId, MonthlyRecord, Subcategory, SubcategoryId};
use crate::reports::granularity::Granularity;

/// Serializable contents of a ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
    #[serde(default)]
    pub records: Vec<MonthlyRecord>,
}

/// A `MonthlyStore` over an owned snapshot
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: LedgerSnapshot,
    owners: HashMap<SubcategoryId, CategoryId>,
}

impl MemoryStore {
    /// Build a store, checking one record per `(month, subcategory)` pair
    pub fn new(mut snapshot: LedgerSnapshot) -> ReportResult<Self> {
        let mut seen = HashSet::new();
        for record in &snapshot.records {
            if !seen.insert((record.month.month_key(), record.subcategory_id)) {
                return Err(ReportError::Validation(format!(
                    "duplicate ledger record for {} in {}",
                    record.subcategory_id, record.month
                )));
            }
        }

        snapshot.categories.sort_by_key(|c| c.id);
        snapshot.subcategories.sort_by_key(|s| s.id);
        snapshot
            .records
            .sort_by_key(|r| (r.month.month_key(), r.subcategory_id));

        let owners = snapshot
            .subcategories
            .iter()
            .map(|s| (s.id, s.category_id))
            .collect();

        Ok(Self { snapshot, owners })
    }

    /// Load a JSON snapshot from disk
    pub fn load(path: &Path) -> ReportResult<Self> {
        debug!(path = %path.display(), "loading ledger snapshot");
        let snapshot: LedgerSnapshot = read_json_required(path)?;
        Self::new(snapshot)
    }

    /// Write the snapshot to disk as JSON
    pub fn save(&self, path: &Path) -> ReportResult<()> {
        write_json_atomic(path, &self.snapshot)
    }

    pub fn snapshot(&self) -> &LedgerSnapshot {
        &self.snapshot
    }

    fn matching<'a>(&'a self, query: &'a MonthlyQuery) -> impl Iterator<Item = &'a MonthlyRecord> {
        self.snapshot.records.iter().filter(move |r| query.matches(r))
    }
}

impl MonthlyStore for MemoryStore {
    fn range_totals(&self, query: &MonthlyQuery) -> ReportResult<RangeTotals> {
        let mut totals = RangeTotals::default();
        for record in self.matching(query) {
            let amount = record.amount;
            totals.min = Some(match totals.min {
                Some(min) if min <= amount => min,
                _ => amount,
            });
            totals.max = Some(match totals.max {
                Some(max) if max >= amount => max,
                _ => amount,
            });
            totals.sum = Some(totals.sum.unwrap_or_default() + amount);
            totals.count += 1;
        }
        Ok(totals)
    }

    fn flow_totals(&self, query: &MonthlyQuery) -> ReportResult<FlowTotals> {
        let mut totals = FlowTotals::default();
        for record in self.matching(query) {
            add_flow(&mut totals, record.amount);
        }
        Ok(totals)
    }

    fn bucket_totals(
        &self,
        query: &MonthlyQuery,
        granularity: Granularity,
    ) -> ReportResult<Vec<BucketTotals>> {
        let mut buckets: BTreeMap<String, FlowTotals> = BTreeMap::new();
        for record in self.matching(query) {
            let entry = buckets
                .entry(granularity.bucket_label(&record.month))
                .or_default();
            add_flow(entry, record.amount);
        }

        Ok(buckets
            .into_iter()
            .map(|(label, totals)| BucketTotals {
                label,
                expenses: totals.expenses,
                income: totals.income,
            })
            .collect())
    }

    fn categories(&self) -> ReportResult<Vec<Category>> {
        Ok(self.snapshot.categories.clone())
    }

    fn subcategories(&self, category: CategoryId) -> ReportResult<Vec<Subcategory>> {
        Ok(self
            .snapshot
            .subcategories
            .iter()
            .filter(|s| s.category_id == category)
            .cloned()
            .collect())
    }

    fn find_subcategory(&self, label: &str) -> ReportResult<Option<SubcategoryId>> {
        let ids: Vec<SubcategoryId> = self
            .snapshot
            .subcategories
            .iter()
            .filter(|s| s.label == label)
            .map(|s| s.id)
            .collect();

        match ids.as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            _ => Err(ReportError::ambiguous(
                "subcategory lookup",
                format!("{} subcategories labelled '{}'", ids.len(), label),
            )),
        }
    }

    fn count(&self, scope: CountScope) -> ReportResult<u64> {
        let count = self
            .snapshot
            .records
            .iter()
            .filter(|r| match scope {
                CountScope::Subcategory(id) => r.subcategory_id == id,
                CountScope::Category(id) => self.owners.get(&r.subcategory_id) == Some(&id),
            })
            .count();
        Ok(count as u64)
    }

    fn month_bounds(&self, excluding: Option<SubcategoryId>) -> ReportResult<Option<MonthBounds>> {
        let mut months = self
            .snapshot
            .records
            .iter()
            .filter(|r| Some(r.subcategory_id) != excluding)
            .map(|r| r.month);

        let Some(first) = months.next() else {
            return Ok(None);
        };
        let (first, last) = months.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m)));
        Ok(Some(MonthBounds { first, last }))
    }
}

fn add_flow(totals: &mut FlowTotals, amount: Amount) {
    if amount.is_negative() {
        totals.expenses += -amount;
    } else if amount.is_positive() {
        totals.income += amount;
    }
}
