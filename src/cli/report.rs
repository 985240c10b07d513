//! Read-only reports: dashboard summary, category list and audit history

use crate::audit::AuditLogger;
use crate::clock::Clock;
use crate::config::Settings;
use crate::display::budget::{format_history, format_summary};
use crate::error::ExpenseResult;
use crate::models::CATEGORIES;
use crate::services::ExpenseStore;
use crate::storage::StateBackend;

/// Print the dashboard for the current month
pub fn handle_summary_command<B: StateBackend, C: Clock>(
    store: &ExpenseStore<B, C>,
    settings: &Settings,
) -> ExpenseResult<()> {
    print!(
        "{}",
        format_summary(
            &store.stats(),
            store.budget_usage_percent(),
            &store.top_categories(settings.top_category_count),
            store.recent(settings.recent_count),
            &settings.currency_symbol,
        )
    );
    Ok(())
}

/// Print every category with its identifier and current limit
pub fn handle_categories_command<B: StateBackend, C: Clock>(
    store: &ExpenseStore<B, C>,
    settings: &Settings,
) -> ExpenseResult<()> {
    println!("{:16} {:18} {:>14}", "ID", "Name", "Limit");
    println!("{}", "-".repeat(50));

    for category in CATEGORIES {
        let limit = store
            .state()
            .category_budget(category.value)
            .filter(|limit| limit.is_positive())
            .map(|limit| limit.format_with_symbol(&settings.currency_symbol))
            .unwrap_or_else(|| "-".to_string());

        println!("{:16} {:18} {:>14}", category.value, category.label, limit);
    }

    Ok(())
}

/// Print the last `limit` audit log entries
pub fn handle_history_command(logger: &AuditLogger, limit: usize) -> ExpenseResult<()> {
    let entries = logger.read_recent(limit)?;
    print!("{}", format_history(&entries));
    Ok(())
}
