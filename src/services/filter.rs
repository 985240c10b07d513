//! Filtering of the transaction list

use std::collections::BTreeSet;

use crate::models::{Transaction, TransactionKind};

/// Criteria for listing transactions; unset criteria match everything
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Case-insensitive substring of the title or note
    pub search: Option<String>,
    /// Exact category identifier
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    /// `YYYY-MM`
    pub month: Option<String>,
    /// Maximum number of results
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check a single transaction against every criterion
    pub fn matches(&self, txn: &Transaction) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                txn.title.to_lowercase().contains(&needle)
                    || txn.note.to_lowercase().contains(&needle)
            }
        };

        matches_search
            && self.category.as_deref().map_or(true, |c| txn.category == c)
            && self.kind.map_or(true, |k| txn.kind == k)
            && self.month.as_deref().map_or(true, |m| txn.month() == m)
    }

    /// Matching transactions, in list order
    pub fn apply<'a>(&self, expenses: &'a [Transaction]) -> Vec<&'a Transaction> {
        let matching = expenses.iter().filter(|t| self.matches(t));
        match self.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }
}

/// Distinct `YYYY-MM` months that have entries, newest first
pub fn available_months(expenses: &[Transaction]) -> Vec<String> {
    let months: BTreeSet<String> = expenses.iter().map(Transaction::month).collect();
    months.into_iter().rev().collect()
}
