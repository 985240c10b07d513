//! Storage layer
//!
//! Loads the budget state from a [`StateBackend`] at startup and writes the
//! whole state back after every change.

pub mod backend;
pub mod file_io;

pub use backend::{FileBackend, MemoryBackend, StateBackend};
pub use file_io::{read_text_opt, write_atomic};

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ExpenseResult;
use crate::models::{BudgetState, Money, Transaction};

/// Stored record as read back, every top-level field optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredState {
    /// Kept raw so one unreadable entry doesn't discard the rest
    #[serde(default)]
    expenses: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    monthly_budget: Option<Money>,
    #[serde(default)]
    category_budgets: Option<BTreeMap<String, Money>>,
}

impl StoredState {
    /// Overlay the stored fields on the default state
    ///
    /// Fields replace the defaults wholesale; `categoryBudgets` in particular
    /// is never merged per key.
    fn merge_over_default(self) -> BudgetState {
        let mut state = BudgetState::default();
        if let Some(expenses) = self.expenses {
            state.expenses = read_expenses(expenses);
        }
        if let Some(monthly_budget) = self.monthly_budget {
            state.monthly_budget = monthly_budget;
        }
        if let Some(category_budgets) = self.category_budgets {
            state.category_budgets = category_budgets;
        }
        state
    }
}

/// Deserialize stored transactions one by one, skipping unreadable entries
fn read_expenses(raw: Vec<serde_json::Value>) -> Vec<Transaction> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(txn) => Some(txn),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable stored transaction");
                None
            }
        })
        .collect()
}

/// Parse a raw record into state
///
/// Returns `None` for blank or malformed content.
pub fn parse_state(raw: &str) -> Option<BudgetState> {
    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<StoredState>(raw) {
        Ok(stored) => Some(stored.merge_over_default()),
        Err(e) => {
            tracing::warn!(error = %e, "stored state is malformed, starting from defaults");
            None
        }
    }
}

/// Load state from the backend
///
/// Never fails: a missing, unreadable or malformed record yields the default
/// state.
pub fn load_state<B: StateBackend + ?Sized>(backend: &B) -> BudgetState {
    let raw = match backend.read() {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "could not read stored state, starting from defaults");
            None
        }
    };

    match raw.as_deref().and_then(parse_state) {
        Some(state) => {
            tracing::debug!(expenses = state.expenses.len(), "loaded stored state");
            state
        }
        None => BudgetState::default(),
    }
}

/// Serialize the full state and write it to the backend
pub fn persist_state<B: StateBackend + ?Sized>(
    backend: &mut B,
    state: &BudgetState,
) -> ExpenseResult<()> {
    let contents = serde_json::to_string_pretty(state)?;
    backend.write(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpensePayload, DEFAULT_MONTHLY_BUDGET};
    use chrono::{NaiveDate, Utc};

    fn sample_state() -> BudgetState {
        let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let mut state = BudgetState::default();
        state.expenses.push(Transaction::from_payload(
            ExpensePayload::new("Groceries", "42.10").category("food"),
            today,
            Utc::now(),
        ));
        state.expenses.push(Transaction::from_payload(
            ExpensePayload::new("Paycheck", "1500").kind("income").note("May"),
            today,
            Utc::now(),
        ));
        state.monthly_budget = Money::from_cents(150_000);
        state
            .category_budgets
            .insert("food".into(), Money::from_cents(30_000));
        state
    }

    #[test]
    fn test_missing_record_is_default() {
        let backend = MemoryBackend::new();
        assert_eq!(load_state(&backend), BudgetState::default());
    }

    #[test]
    fn test_malformed_record_is_default() {
        let backend = MemoryBackend::with_contents("{not json");
        let state = load_state(&backend);

        assert!(state.expenses.is_empty());
        assert_eq!(state.monthly_budget, DEFAULT_MONTHLY_BUDGET);
        assert!(state.category_budgets.is_empty());
    }

    #[test]
    fn test_wrongly_shaped_record_is_default() {
        let backend = MemoryBackend::with_contents(r#"{"expenses": "lots", "monthlyBudget": 5}"#);
        assert_eq!(load_state(&backend), BudgetState::default());

        let backend = MemoryBackend::with_contents("42");
        assert_eq!(load_state(&backend), BudgetState::default());
    }

    #[test]
    fn test_blank_record_is_default() {
        let backend = MemoryBackend::with_contents("   ");
        assert_eq!(load_state(&backend), BudgetState::default());
    }

    #[test]
    fn test_round_trip() {
        let state = sample_state();
        let mut backend = MemoryBackend::new();

        persist_state(&mut backend, &state).unwrap();

        assert_eq!(load_state(&backend), state);
    }

    #[test]
    fn test_partial_record_keeps_defaults_for_missing_fields() {
        let backend = MemoryBackend::with_contents(r#"{"categoryBudgets": {"health": 80}}"#);
        let state = load_state(&backend);

        assert!(state.expenses.is_empty());
        assert_eq!(state.monthly_budget, DEFAULT_MONTHLY_BUDGET);
        assert_eq!(state.category_budget("health"), Some(Money::from_cents(8000)));
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let backend = MemoryBackend::with_contents(r#"{"expenses": null, "monthlyBudget": 99.5}"#);
        let state = load_state(&backend);

        assert!(state.expenses.is_empty());
        assert_eq!(state.monthly_budget, Money::from_cents(9950));
    }

    #[test]
    fn test_stored_record_from_older_writer() {
        let raw = r#"{
            "expenses": [{
                "id": "exp_1700000000000_9f3a",
                "title": "Bus pass",
                "amount": 25,
                "category": "transport",
                "date": "2024-11-02",
                "type": "refund",
                "createdAt": "2024-11-02T08:00:00.000Z"
            }],
            "monthlyBudget": 1200,
            "theme": "dark"
        }"#;
        let state = parse_state(raw).unwrap();

        let txn = &state.expenses[0];
        assert_eq!(txn.id.as_str(), "exp_1700000000000_9f3a");
        assert_eq!(txn.amount, Money::from_cents(2500));
        assert_eq!(txn.note, "");
        assert!(!txn.is_income());
        assert_eq!(state.monthly_budget, Money::from_cents(120_000));
    }

    #[test]
    fn test_one_bad_transaction_keeps_the_rest() {
        let raw = r#"{
            "expenses": [
                {"id": "a", "title": "Lunch", "amount": 12, "category": "food",
                 "date": "2025-04-01", "type": "expense"},
                {"id": "b", "title": "Broken", "amount": 3, "date": "not a date"},
                {"id": "c", "title": "Bus", "amount": 2.5, "category": "transport",
                 "date": "2025-04-02", "createdAt": "2025-04-02T07:00:00Z"}
            ],
            "monthlyBudget": 1500,
            "categoryBudgets": {"food": 50}
        }"#;
        let state = parse_state(raw).unwrap();

        let ids: Vec<&str> = state.expenses.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(state.expenses[0].title, "Lunch");
        assert_eq!(state.monthly_budget, Money::from_cents(150_000));
        assert_eq!(state.category_budget("food"), Some(Money::from_cents(5000)));
    }

    #[test]
    fn test_persisted_record_uses_camel_case_keys() {
        let mut backend = MemoryBackend::new();
        persist_state(&mut backend, &sample_state()).unwrap();

        let value: serde_json::Value = serde_json::from_str(backend.contents().unwrap()).unwrap();
        assert!(value.get("monthlyBudget").is_some());
        assert!(value.get("categoryBudgets").is_some());
        assert_eq!(value["expenses"].as_array().unwrap().len(), 2);
    }
}
