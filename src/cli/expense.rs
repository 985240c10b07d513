//! Expense CLI commands
//!
//! Add, list, inspect, edit and delete income/expense entries.

use clap::Subcommand;

use crate::clock::Clock;
use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    find_category, parse_date, ExpensePayload, ExpenseUpdate, Money, TransactionKind,
};
use crate::services::{ExpenseFilter, ExpenseStore};
use crate::storage::StateBackend;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense (or income with --income)
    Add {
        /// What the money was spent on
        title: String,
        /// Amount, e.g. "12.50"
        amount: String,
        /// Category identifier or name, defaults to food
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
        /// Record as income instead of an expense
        #[arg(long)]
        income: bool,
    },
    /// List entries, newest first
    List {
        /// Search in titles and notes
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by category identifier or name
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by type (expense or income)
        #[arg(short = 't', long = "type", value_parser = ["expense", "income"])]
        kind: Option<String>,
        /// Filter by month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show entry details
    Show {
        /// Entry ID or unique ID prefix
        id: String,
    },
    /// Edit an entry
    Edit {
        /// Entry ID or unique ID prefix
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// New note (empty string clears it)
        #[arg(long)]
        note: Option<String>,
        /// New type (expense or income)
        #[arg(long = "type", value_parser = ["expense", "income"])]
        kind: Option<String>,
    },
    /// Delete an entry
    Delete {
        /// Entry ID or unique ID prefix
        id: String,
    },
    /// List the months that have entries
    Months,
}

/// Handle an expense command
pub fn handle_expense_command<B: StateBackend, C: Clock>(
    store: &mut ExpenseStore<B, C>,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            title,
            amount,
            category,
            date,
            note,
            income,
        } => {
            let mut payload = ExpensePayload::new(validate_title(&title)?, validate_amount(&amount)?);
            if let Some(category) = category {
                payload = payload.category(resolve_category(&category)?);
            }
            if let Some(date) = date {
                payload = payload.date(validate_date(&date)?);
            }
            if let Some(note) = note {
                payload = payload.note(note);
            }
            if income {
                payload = payload.kind(TransactionKind::Income.as_str());
            }

            let txn = store.add_expense(payload);
            store.flush()?;

            println!(
                "Added {}: {} {}",
                txn.kind.as_str(),
                txn.title,
                txn.amount.format_with_symbol(symbol)
            );
            println!("  ID: {}", txn.id);
        }

        ExpenseCommands::List {
            search,
            category,
            kind,
            month,
            limit,
        } => {
            let mut filter = ExpenseFilter::new();
            if let Some(search) = search {
                filter = filter.search(search);
            }
            if let Some(category) = category {
                // Unknown identifiers are kept so entries with retired categories stay listable
                let value = find_category(&category)
                    .map(|c| c.value.to_string())
                    .unwrap_or(category);
                filter = filter.category(value);
            }
            if let Some(kind) = kind {
                filter = filter.kind(TransactionKind::from_input(&kind));
            }
            if let Some(month) = month {
                filter = filter.month(month.trim());
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let matching = store.filter(&filter);
            print!(
                "{}",
                format_transaction_list(&matching, store.expenses().len(), symbol)
            );
        }

        ExpenseCommands::Show { id } => {
            let txn = store.find(&id)?;
            print!("{}", format_transaction_details(txn, symbol));
        }

        ExpenseCommands::Edit {
            id,
            title,
            amount,
            category,
            date,
            note,
            kind,
        } => {
            let target = store.find(&id)?.id.clone();

            let mut updates = ExpenseUpdate::new();
            if let Some(title) = title {
                updates = updates.title(validate_title(&title)?);
            }
            if let Some(amount) = amount {
                updates = updates.amount(validate_amount(&amount)?);
            }
            if let Some(category) = category {
                updates = updates.category(resolve_category(&category)?);
            }
            if let Some(date) = date {
                updates = updates.date(validate_date(&date)?);
            }
            if let Some(note) = note {
                updates = updates.note(note);
            }
            if let Some(kind) = kind {
                updates = updates.kind(kind);
            }

            if updates.is_empty() {
                return Err(ExpenseError::Validation(
                    "Nothing to change. Pass at least one of --title, --amount, --category, \
                     --date, --note or --type"
                        .into(),
                ));
            }

            let txn = store
                .update_expense(&target, updates)
                .ok_or_else(|| ExpenseError::transaction_not_found(target.as_str()))?;
            store.flush()?;

            println!("Updated {}: {}", txn.id.short(), txn.title);
        }

        ExpenseCommands::Delete { id } => {
            let txn = store.find(&id)?.clone();
            if !store.delete_expense(&txn.id) {
                return Err(ExpenseError::transaction_not_found(txn.id.as_str()));
            }
            store.flush()?;

            println!(
                "Deleted {}: {} {}",
                txn.id.short(),
                txn.title,
                txn.amount.format_with_symbol(symbol)
            );
        }

        ExpenseCommands::Months => {
            let months = store.available_months();
            if months.is_empty() {
                println!("No entries yet.");
                return Ok(());
            }

            for month in months {
                let count = store.filter(&ExpenseFilter::new().month(month.as_str())).len();
                println!("{}  ({} entries)", month, count);
            }
        }
    }

    Ok(())
}

/// Reject blank titles; returns the trimmed title
pub(crate) fn validate_title(title: &str) -> ExpenseResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ExpenseError::Validation("Title cannot be empty".into()));
    }
    Ok(title.to_string())
}

/// Require an amount greater than zero; returns it with two decimals
pub(crate) fn validate_amount(amount: &str) -> ExpenseResult<String> {
    let money = Money::from_input(amount);
    if !money.is_positive() {
        return Err(ExpenseError::Validation(format!(
            "Amount must be greater than zero: '{}'",
            amount
        )));
    }
    Ok(money.to_string())
}

/// Map a category identifier or label to its identifier
pub(crate) fn resolve_category(category: &str) -> ExpenseResult<&'static str> {
    find_category(category).map(|c| c.value).ok_or_else(|| {
        ExpenseError::Validation(format!(
            "Unknown category '{}'. Run 'expense categories' to see the list",
            category
        ))
    })
}

pub(crate) fn validate_date(date: &str) -> ExpenseResult<String> {
    parse_date(date)
        .map(|d| d.to_string())
        .ok_or_else(|| {
            ExpenseError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", date))
        })
}
