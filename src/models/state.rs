//! The full persisted state: transactions plus budgets
//!
//! This is exactly what gets written to the state record on every change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::money::Money;
use super::transaction::Transaction;

/// Monthly budget used when nothing has been stored yet
pub const DEFAULT_MONTHLY_BUDGET: Money = Money::from_units_cents(2000, 0);

/// Transactions and budgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetState {
    /// Newest-inserted first
    pub expenses: Vec<Transaction>,

    /// Spending target for the current calendar month
    pub monthly_budget: Money,

    /// Per-category limits; categories without an entry have no limit
    pub category_budgets: BTreeMap<String, Money>,
}

impl Default for BudgetState {
    fn default() -> Self {
        Self {
            expenses: Vec::new(),
            monthly_budget: DEFAULT_MONTHLY_BUDGET,
            category_budgets: BTreeMap::new(),
        }
    }
}

impl BudgetState {
    /// The limit set for `category`, if any
    pub fn category_budget(&self, category: &str) -> Option<Money> {
        self.category_budgets.get(category).copied()
    }
}
