//! Transaction model
//!
//! A transaction is a single income or expense entry. Raw user input arrives
//! as an [`ExpensePayload`] or [`ExpenseUpdate`] of loosely-typed strings and
//! is normalized here, so nothing malformed ever reaches the stored list.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::default_category;
use super::ids::TransactionId;
use super::money::Money;

/// Placeholder title for entries submitted without one
pub const UNTITLED: &str = "Untitled";

/// Date format used on disk and in user input
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a transaction is money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TransactionKind {
    #[default]
    Expense,
    Income,
}

impl TransactionKind {
    /// Normalize a raw type string: only `"income"` is income
    pub fn from_input(input: &str) -> Self {
        if input == "income" {
            Self::Income
        } else {
            Self::Expense
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl From<String> for TransactionKind {
    fn from(s: String) -> Self {
        Self::from_input(&s)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

/// A recorded income or expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Display title, never blank
    #[serde(default = "untitled")]
    pub title: String,

    /// Non-negative amount, rounded to cents
    #[serde(default)]
    pub amount: Money,

    /// Category identifier
    #[serde(default = "stored_default_category")]
    pub category: String,

    /// Date the entry applies to
    pub date: NaiveDate,

    /// Free-text note
    #[serde(default)]
    pub note: String,

    #[serde(rename = "type", default)]
    pub kind: TransactionKind,

    /// When the entry was recorded; the Unix epoch if the stored record lacks it
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

fn untitled() -> String {
    UNTITLED.to_string()
}

fn stored_default_category() -> String {
    default_category().to_string()
}

impl Transaction {
    /// Build a new transaction from raw input
    ///
    /// `today` fills in a missing date and `now` becomes `created_at`.
    pub fn from_payload(payload: ExpensePayload, today: NaiveDate, now: DateTime<Utc>) -> Self {
        let title = payload
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
            .to_string();

        let category = payload
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| default_category())
            .to_string();

        Self {
            id: TransactionId::new(),
            title,
            amount: payload
                .amount
                .as_deref()
                .map(Money::from_input)
                .unwrap_or_default(),
            category,
            date: payload.date.as_deref().and_then(parse_date).unwrap_or(today),
            note: payload
                .note
                .as_deref()
                .map(|n| n.trim().to_string())
                .unwrap_or_default(),
            kind: payload
                .kind
                .as_deref()
                .map(TransactionKind::from_input)
                .unwrap_or_default(),
            created_at: now,
        }
    }

    /// Apply the fields present in `updates`, leaving the rest untouched
    ///
    /// Blank titles and categories and unparsable dates are ignored rather
    /// than applied. Applying the same update twice gives the same result as
    /// applying it once.
    pub fn apply_update(&mut self, updates: &ExpenseUpdate) {
        if let Some(title) = updates.title.as_deref().map(str::trim) {
            if !title.is_empty() {
                self.title = title.to_string();
            }
        }
        if let Some(amount) = updates.amount.as_deref() {
            self.amount = Money::from_input(amount);
        }
        if let Some(category) = updates.category.as_deref().map(str::trim) {
            if !category.is_empty() {
                self.category = category.to_string();
            }
        }
        if let Some(date) = updates.date.as_deref().and_then(parse_date) {
            self.date = date;
        }
        if let Some(note) = updates.note.as_deref() {
            self.note = note.trim().to_string();
        }
        if let Some(kind) = updates.kind.as_deref() {
            self.kind = TransactionKind::from_input(kind);
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// `YYYY-MM` label of the month this entry falls in
    pub fn month(&self) -> String {
        month_key(self.date)
    }

    /// Check whether the entry falls in the same calendar month as `day`
    pub fn in_month_of(&self, day: NaiveDate) -> bool {
        self.date.year() == day.year() && self.date.month() == day.month()
    }
}

/// `YYYY-MM` label of the month containing `date`
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

/// Raw input for a new transaction
///
/// All fields are optional strings as a form would submit them; see
/// [`Transaction::from_payload`] for how each is defaulted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExpensePayload {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub note: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ExpensePayload {
    pub fn new(title: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            amount: Some(amount.into()),
            ..Self::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// Partial changes to an existing transaction; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExpenseUpdate {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub note: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ExpenseUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Check whether no field would change
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_from_payload_normalizes() {
        let payload = ExpensePayload::new("  Coffee ", "4.999")
            .category("food")
            .date("2025-03-01")
            .note("  oat milk  ")
            .kind("expense");

        let txn = Transaction::from_payload(payload, today(), now());

        assert_eq!(txn.title, "Coffee");
        assert_eq!(txn.amount, Money::from_cents(500));
        assert_eq!(txn.category, "food");
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(txn.note, "oat milk");
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.created_at, now());
    }

    #[test]
    fn test_from_payload_defaults() {
        let txn = Transaction::from_payload(ExpensePayload::default(), today(), now());

        assert_eq!(txn.title, UNTITLED);
        assert!(txn.amount.is_zero());
        assert_eq!(txn.category, "food");
        assert_eq!(txn.date, today());
        assert_eq!(txn.note, "");
        assert_eq!(txn.kind, TransactionKind::Expense);
    }

    #[test]
    fn test_blank_and_invalid_fields_fall_back() {
        let payload = ExpensePayload::new("   ", "-12")
            .category(" ")
            .date("not a date")
            .kind("refund");

        let txn = Transaction::from_payload(payload, today(), now());

        assert_eq!(txn.title, UNTITLED);
        assert!(txn.amount.is_zero());
        assert_eq!(txn.category, "food");
        assert_eq!(txn.date, today());
        assert_eq!(txn.kind, TransactionKind::Expense);
    }

    #[test]
    fn test_apply_update_only_touches_present_fields() {
        let payload = ExpensePayload::new("Paycheck", "1000").kind("income").note("march");
        let mut txn = Transaction::from_payload(payload, today(), now());
        let original = txn.clone();

        txn.apply_update(&ExpenseUpdate::new().title("Salary"));

        assert_eq!(txn.title, "Salary");
        assert_eq!(txn.amount, original.amount);
        assert_eq!(txn.kind, TransactionKind::Income);
        assert_eq!(txn.note, "march");
        assert_eq!(txn.id, original.id);
        assert_eq!(txn.created_at, original.created_at);
    }

    #[test]
    fn test_apply_update_ignores_blank_values() {
        let mut txn = Transaction::from_payload(ExpensePayload::new("Rent", "400"), today(), now());

        txn.apply_update(
            &ExpenseUpdate::new()
                .title("  ")
                .category("")
                .date("31/12/2025")
                .note("   "),
        );

        assert_eq!(txn.title, "Rent");
        assert_eq!(txn.category, "food");
        assert_eq!(txn.date, today());
        assert_eq!(txn.note, "");
    }

    #[test]
    fn test_apply_update_is_idempotent() {
        let mut txn = Transaction::from_payload(ExpensePayload::new("Taxi", "12"), today(), now());
        let update = ExpenseUpdate::new().amount("15.25").kind("income").date("2025-02-28");

        txn.apply_update(&update);
        let once = txn.clone();
        txn.apply_update(&update);

        assert_eq!(txn, once);
        assert_eq!(txn.amount, Money::from_cents(1525));
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(serde_json::to_string(&TransactionKind::Income).unwrap(), r#""income""#);
        let kind: TransactionKind = serde_json::from_str(r#""Income""#).unwrap();
        assert_eq!(kind, TransactionKind::Expense);
    }

    #[test]
    fn test_transaction_wire_shape() {
        let txn = Transaction::from_payload(
            ExpensePayload::new("Coffee", "5").date("2025-03-02"),
            today(),
            now(),
        );
        let value = serde_json::to_value(&txn).unwrap();

        assert_eq!(value["title"], "Coffee");
        assert_eq!(value["amount"], 5.0);
        assert_eq!(value["date"], "2025-03-02");
        assert_eq!(value["type"], "expense");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_incomplete_stored_transaction_gets_defaults() {
        let raw = r#"{"id": "legacy-1", "amount": 12, "date": "2025-01-05"}"#;
        let txn: Transaction = serde_json::from_str(raw).unwrap();

        assert_eq!(txn.id.as_str(), "legacy-1");
        assert_eq!(txn.title, UNTITLED);
        assert_eq!(txn.category, "food");
        assert_eq!(txn.amount, Money::from_cents(1200));
        assert_eq!(txn.created_at, DateTime::<Utc>::default());
    }

    #[test]
    fn test_month_helpers() {
        let txn = Transaction::from_payload(ExpensePayload::new("x", "1"), today(), now());
        assert_eq!(txn.month(), "2025-03");
        assert!(txn.in_month_of(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
        assert!(!txn.in_month_of(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()));
    }
}
