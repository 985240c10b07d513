//! Core data models
//!
//! Transactions, money, the category list and the persisted budget state.

pub mod category;
pub mod ids;
pub mod money;
pub mod state;
pub mod transaction;

pub use category::{category_label, default_category, find_category, Category, CATEGORIES};
pub use ids::TransactionId;
pub use money::Money;
pub use state::{BudgetState, DEFAULT_MONTHLY_BUDGET};
pub use transaction::{
    month_key, parse_date, ExpensePayload, ExpenseUpdate, Transaction, TransactionKind,
};
