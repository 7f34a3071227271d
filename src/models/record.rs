//! Monthly ledger rows

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::ids::SubcategoryId;
use super::month::YearMonth;

/// The total of one subcategory for one month
///
/// One record exists per `(month, subcategory_id)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub month: YearMonth,
    pub subcategory_id: SubcategoryId,
    pub amount: Amount,
}

impl MonthlyRecord {
    pub fn new(month: YearMonth, subcategory_id: SubcategoryId, amount: impl Into<Amount>) -> Self {
        Self {
            month: month.without_day(),
            subcategory_id,
            amount: amount.into(),
        }
    }
}
