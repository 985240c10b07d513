//! The expense store
//!
//! [`ExpenseStore`] owns the canonical [`BudgetState`], applies every change
//! through its mutation methods and writes the full state back to its
//! backend after each one. Consumers get a store value handed to them; there
//! is no global instance.
//!
//! Mutations never fail on bad input. Amounts, titles, dates and types are
//! normalized instead, and unknown ids are reported through the return value
//! rather than as errors.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::clock::{Clock, SystemClock};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    category_label, BudgetState, ExpensePayload, ExpenseUpdate, Money, Transaction,
    TransactionId, CATEGORIES,
};
use crate::storage::{load_state, persist_state, FileBackend, StateBackend};

use super::filter::{available_months, ExpenseFilter};
use super::stats::{
    budget_usage_percent, category_statuses, compute_stats, top_categories,
    CategoryBudgetStatus, CategoryShare, MonthlyStats,
};

/// Audit id used for the monthly budget
const MONTHLY_BUDGET_KEY: &str = "monthly";

/// Everything a consumer reads, taken at one point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub expenses: Vec<Transaction>,
    pub monthly_budget: Money,
    pub category_budgets: BTreeMap<String, Money>,
    pub stats: MonthlyStats,
}

/// In-memory budget state mirrored to a [`StateBackend`]
pub struct ExpenseStore<B: StateBackend = FileBackend, C: Clock = SystemClock> {
    backend: B,
    clock: C,
    state: BudgetState,
    audit: Option<AuditLogger>,
    last_persist_error: Option<String>,
}

impl<B: StateBackend, C: Clock> ExpenseStore<B, C> {
    /// Load state from `backend` and create the store
    ///
    /// A missing or malformed record gives the default state.
    pub fn open(backend: B, clock: C) -> Self {
        let state = load_state(&backend);
        Self {
            backend,
            clock,
            state,
            audit: None,
            last_persist_error: None,
        }
    }

    /// Record every mutation in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    /// All transactions, newest-inserted first
    pub fn expenses(&self) -> &[Transaction] {
        &self.state.expenses
    }

    pub fn monthly_budget(&self) -> Money {
        self.state.monthly_budget
    }

    pub fn category_budgets(&self) -> &BTreeMap<String, Money> {
        &self.state.category_budgets
    }

    /// Statistics for the current calendar month, per the store's clock
    pub fn stats(&self) -> MonthlyStats {
        compute_stats(
            &self.state.expenses,
            self.state.monthly_budget,
            self.clock.today(),
        )
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            expenses: self.state.expenses.clone(),
            monthly_budget: self.state.monthly_budget,
            category_budgets: self.state.category_budgets.clone(),
            stats: self.stats(),
        }
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.state.expenses.iter().find(|t| &t.id == id)
    }

    /// Find a transaction by full id or by a unique id prefix
    pub fn find(&self, identifier: &str) -> ExpenseResult<&Transaction> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ExpenseError::transaction_not_found(identifier));
        }

        if let Some(txn) = self.get(&TransactionId::from(identifier)) {
            return Ok(txn);
        }

        let mut matches = self
            .state
            .expenses
            .iter()
            .filter(|t| t.id.starts_with(identifier));

        match (matches.next(), matches.count()) {
            (Some(txn), 0) => Ok(txn),
            (Some(_), others) => Err(ExpenseError::Ambiguous {
                identifier: identifier.to_string(),
                matches: others + 1,
            }),
            (None, _) => Err(ExpenseError::transaction_not_found(identifier)),
        }
    }

    /// The first `count` transactions in store order
    pub fn recent(&self, count: usize) -> &[Transaction] {
        let end = count.min(self.state.expenses.len());
        &self.state.expenses[..end]
    }

    pub fn filter(&self, filter: &ExpenseFilter) -> Vec<&Transaction> {
        filter.apply(&self.state.expenses)
    }

    pub fn available_months(&self) -> Vec<String> {
        available_months(&self.state.expenses)
    }

    /// This month's spending against every known category's limit
    pub fn category_statuses(&self) -> Vec<CategoryBudgetStatus> {
        category_statuses(&self.stats(), &self.state.category_budgets, CATEGORIES)
    }

    pub fn budget_usage_percent(&self) -> f64 {
        budget_usage_percent(self.stats().spending, self.state.monthly_budget)
    }

    pub fn top_categories(&self, count: usize) -> Vec<CategoryShare> {
        top_categories(&self.stats(), count)
    }

    /// Create a transaction from raw input and put it at the front of the list
    pub fn add_expense(&mut self, payload: ExpensePayload) -> Transaction {
        let txn = Transaction::from_payload(payload, self.clock.today(), self.clock.now());
        self.state.expenses.insert(0, txn.clone());

        tracing::debug!(id = %txn.id, amount = %txn.amount, "added transaction");
        self.persist();
        self.audit(AuditEntry::create(
            self.clock.now(),
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.title.clone()),
            &txn,
        ));

        txn
    }

    /// Apply `updates` to the transaction with `id`
    ///
    /// Returns the updated transaction, or `None` if no transaction has that
    /// id, in which case the list is left as it was.
    pub fn update_expense(
        &mut self,
        id: &TransactionId,
        updates: ExpenseUpdate,
    ) -> Option<Transaction> {
        let change = self
            .state
            .expenses
            .iter_mut()
            .find(|t| &t.id == id)
            .map(|txn| {
                let before = txn.clone();
                txn.apply_update(&updates);
                (before, txn.clone())
            });

        self.persist();

        match change {
            Some((before, after)) => {
                tracing::debug!(id = %id, "updated transaction");
                self.audit(AuditEntry::update(
                    self.clock.now(),
                    EntityType::Transaction,
                    id.to_string(),
                    Some(after.title.clone()),
                    &before,
                    &after,
                ));
                Some(after)
            }
            None => {
                tracing::debug!(id = %id, "update for unknown transaction ignored");
                None
            }
        }
    }

    /// Remove the transaction with `id`; returns whether one was removed
    pub fn delete_expense(&mut self, id: &TransactionId) -> bool {
        let position = self.state.expenses.iter().position(|t| &t.id == id);
        let removed = position.map(|idx| self.state.expenses.remove(idx));

        self.persist();

        match removed {
            Some(txn) => {
                tracing::debug!(id = %id, "deleted transaction");
                self.audit(AuditEntry::delete(
                    self.clock.now(),
                    EntityType::Transaction,
                    id.to_string(),
                    Some(txn.title.clone()),
                    &txn,
                ));
                true
            }
            None => {
                tracing::debug!(id = %id, "delete for unknown transaction ignored");
                false
            }
        }
    }

    /// Replace the monthly budget with the normalized `value`
    pub fn set_monthly_budget(&mut self, value: &str) -> Money {
        let before = self.state.monthly_budget;
        let after = Money::from_input(value);
        self.state.monthly_budget = after;

        self.persist();
        self.audit(AuditEntry::update(
            self.clock.now(),
            EntityType::MonthlyBudget,
            MONTHLY_BUDGET_KEY,
            None,
            &before,
            &after,
        ));

        after
    }

    /// Set or overwrite the limit for `category`
    ///
    /// The category identifier is not checked against the category list.
    pub fn set_category_budget(&mut self, category: impl Into<String>, value: &str) -> Money {
        let category = category.into();
        let after = Money::from_input(value);
        let before = self.state.category_budgets.insert(category.clone(), after);

        self.persist();

        let name = Some(category_label(&category).to_string());
        let entry = match before {
            Some(before) => AuditEntry::update(
                self.clock.now(),
                EntityType::CategoryBudget,
                category.as_str(),
                name,
                &before,
                &after,
            ),
            None => AuditEntry::create(
                self.clock.now(),
                EntityType::CategoryBudget,
                category.as_str(),
                name,
                &after,
            ),
        };
        self.audit(entry);

        after
    }

    /// Report whether the state is safely written
    ///
    /// Retries the write only if the last one failed, so a successful
    /// mutation is not written a second time.
    pub fn flush(&mut self) -> ExpenseResult<()> {
        if self.last_persist_error.is_none() {
            return Ok(());
        }
        self.write_state()
    }

    /// Error from the most recent write, if it failed
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    fn write_state(&mut self) -> ExpenseResult<()> {
        let result = persist_state(&mut self.backend, &self.state);
        self.last_persist_error = result.as_ref().err().map(ToString::to_string);
        result
    }

    fn persist(&mut self) {
        if let Err(e) = self.write_state() {
            tracing::error!(error = %e, "failed to persist state");
        }
    }

    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                tracing::warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}
