//! Business logic layer
//!
//! The store and its mutation API, derived statistics and list filtering.

pub mod filter;
pub mod stats;
pub mod store;

pub use filter::{available_months, ExpenseFilter};
pub use stats::{
    budget_usage_percent, category_statuses, compute_stats, top_categories, CategoryBudgetStatus,
    CategoryShare, MonthlyStats,
};
pub use store::{ExpenseStore, Snapshot};
