//! Budget and statistics display formatting

use crate::audit::AuditEntry;
use crate::models::{category_label, Money, Transaction};
use crate::services::{CategoryBudgetStatus, CategoryShare, MonthlyStats};

use super::transaction::format_transaction_row;

const BAR_WIDTH: usize = 30;

/// Render a progress bar, capped at full
pub fn progress_bar(percent: f64, width: usize) -> String {
    let clamped = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Monthly budget overview with per-category limits
pub fn format_budget_overview(
    monthly_budget: Money,
    stats: &MonthlyStats,
    usage_percent: f64,
    statuses: &[CategoryBudgetStatus],
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget Overview: {}\n", stats.month));
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "Monthly budget: {:>16}\n",
        monthly_budget.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Spent:          {:>16}\n",
        stats.spending.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Remaining:      {:>16}{}\n",
        stats.budget_remaining.format_with_symbol(symbol),
        if stats.budget_remaining.is_negative() {
            "  OVER BUDGET"
        } else {
            ""
        }
    ));
    output.push_str(&format!(
        "{} {:.0}%\n",
        progress_bar(usage_percent, BAR_WIDTH),
        usage_percent
    ));

    output.push_str("\nCategory budgets\n");
    output.push_str(&format!(
        "{:18} {:>14} {:>14} {:>16}\n",
        "Category", "Spent", "Limit", "Remaining"
    ));
    output.push_str(&"-".repeat(65));
    output.push('\n');

    for status in statuses {
        let (limit, remaining) = match (status.limit, status.remaining()) {
            (Some(limit), Some(remaining)) => (
                limit.format_with_symbol(symbol),
                format!(
                    "{}{}",
                    remaining.format_with_symbol(symbol),
                    if status.is_over() { " !" } else { "" }
                ),
            ),
            _ => ("-".to_string(), "No limit set".to_string()),
        };

        output.push_str(&format!(
            "{:18} {:>14} {:>14} {:>16}\n",
            status.category.label,
            status.spent.format_with_symbol(symbol),
            limit,
            remaining
        ));
    }

    output
}

/// Dashboard: month totals, top categories and the latest entries
pub fn format_summary(
    stats: &MonthlyStats,
    usage_percent: f64,
    top: &[CategoryShare],
    recent: &[Transaction],
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Summary for {}\n", stats.month));
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!("Income:    {:>16}\n", stats.income.format_with_symbol(symbol)));
    output.push_str(&format!("Spending:  {:>16}\n", stats.spending.format_with_symbol(symbol)));
    output.push_str(&format!("Net:       {:>16}\n", stats.net.format_with_symbol(symbol)));
    output.push_str(&format!(
        "Remaining: {:>16}\n",
        stats.budget_remaining.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Budget used: {:.0}%\n", usage_percent));

    output.push_str("\nTop categories\n");
    if top.is_empty() {
        output.push_str("  No spending yet this month.\n");
    }
    for share in top {
        output.push_str(&format!(
            "  {:18} {:>14} {} {:.0}%\n",
            category_label(&share.category),
            share.spent.format_with_symbol(symbol),
            progress_bar(share.percent, 20),
            share.percent
        ));
    }

    output.push_str("\nRecent entries\n");
    if recent.is_empty() {
        output.push_str("  No entries yet.\n");
    }
    for txn in recent {
        output.push_str(&format!("  {}\n", format_transaction_row(txn, symbol)));
    }

    output
}

/// Audit history, oldest first
pub fn format_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No history recorded.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    output
}
