//! Display formatting for terminal output

pub mod budget;
pub mod transaction;

pub use budget::{format_budget_overview, format_history, format_summary, progress_bar};
pub use transaction::{format_transaction_details, format_transaction_list, format_transaction_row};
