//! Budget CLI commands
//!
//! Show the monthly overview and set the monthly or per-category limits.

use clap::Subcommand;

use crate::clock::Clock;
use crate::config::Settings;
use crate::display::budget::format_budget_overview;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::find_category;
use crate::services::ExpenseStore;
use crate::storage::StateBackend;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show this month's budget overview
    Show,
    /// Set the monthly budget
    Set {
        /// Amount, e.g. "2500"
        amount: String,
    },
    /// Set the limit for one category (0 removes the limit)
    Category {
        /// Category identifier or name
        category: String,
        /// Amount, e.g. "300"
        amount: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command<B: StateBackend, C: Clock>(
    store: &mut ExpenseStore<B, C>,
    settings: &Settings,
    cmd: BudgetCommands,
) -> ExpenseResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Show => {
            print!(
                "{}",
                format_budget_overview(
                    store.monthly_budget(),
                    &store.stats(),
                    store.budget_usage_percent(),
                    &store.category_statuses(),
                    symbol,
                )
            );
        }

        BudgetCommands::Set { amount } => {
            let budget = store.set_monthly_budget(&amount);
            store.flush()?;

            println!("Monthly budget set to {}", budget.format_with_symbol(symbol));
        }

        BudgetCommands::Category { category, amount } => {
            let category = find_category(&category)
                .ok_or_else(|| ExpenseError::category_not_found(category.as_str()))?;

            let limit = store.set_category_budget(category.value, &amount);
            store.flush()?;

            if limit.is_positive() {
                println!(
                    "Budget for {} set to {}",
                    category.label,
                    limit.format_with_symbol(symbol)
                );
            } else {
                println!("Removed the budget limit for {}", category.label);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::Money;
    use crate::storage::MemoryBackend;

    fn store() -> ExpenseStore<MemoryBackend, FixedClock> {
        ExpenseStore::open(MemoryBackend::new(), FixedClock::on(2025, 3, 15).unwrap())
    }

    #[test]
    fn test_set_monthly_budget() {
        let mut store = store();
        handle_budget_command(
            &mut store,
            &Settings::default(),
            BudgetCommands::Set {
                amount: "2500.5".into(),
            },
        )
        .unwrap();

        assert_eq!(store.monthly_budget(), Money::from_cents(250_050));
        assert_eq!(store.backend().write_count(), 1);
    }

    #[test]
    fn test_set_category_budget_by_label() {
        let mut store = store();
        handle_budget_command(
            &mut store,
            &Settings::default(),
            BudgetCommands::Category {
                category: "Housing & Rent".into(),
                amount: "900".into(),
            },
        )
        .unwrap();

        assert_eq!(
            store.category_budgets().get("housing"),
            Some(&Money::from_cents(90_000))
        );
    }

    #[test]
    fn test_unknown_category_is_not_found() {
        let mut store = store();
        let err = handle_budget_command(
            &mut store,
            &Settings::default(),
            BudgetCommands::Category {
                category: "gadgets".into(),
                amount: "10".into(),
            },
        )
        .unwrap_err();

        assert!(err.is_not_found());
        assert!(store.category_budgets().is_empty());
    }
}
