//! Transaction display formatting

use crate::models::{category_label, Transaction, TransactionKind};

/// Format a single transaction as one list row
pub fn format_transaction_row(txn: &Transaction, symbol: &str) -> String {
    let sign = match txn.kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };

    format!(
        "{:8}  {}  {:24} {:16} {}{:>14}",
        txn.id.short(),
        txn.date.format("%Y-%m-%d"),
        truncate(&txn.title, 24),
        truncate(category_label(&txn.category), 16),
        sign,
        txn.amount.format_with_symbol(symbol)
    )
}

/// Format a list of transactions with a header and a count line
pub fn format_transaction_list(transactions: &[&Transaction], total: usize, symbol: &str) -> String {
    if transactions.is_empty() {
        return "No entries found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:8}  {:10}  {:24} {:16} {:>15}\n",
        "ID", "Date", "Title", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(78));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, symbol));
        output.push('\n');
    }

    output.push_str(&format!(
        "\n{} entries shown out of {}\n",
        transactions.len(),
        total
    ));

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entry:    {}\n", txn.id));
    output.push_str(&format!("Title:    {}\n", txn.title));
    output.push_str(&format!("Type:     {}\n", txn.kind));
    output.push_str(&format!("Amount:   {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!(
        "Category: {} ({})\n",
        category_label(&txn.category),
        txn.category
    ));
    output.push_str(&format!("Date:     {}\n", txn.date.format("%Y-%m-%d")));

    if !txn.note.is_empty() {
        output.push_str(&format!("Note:     {}\n", txn.note));
    }

    output.push_str(&format!(
        "Recorded: {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// Truncate to `max_len` characters, marking the cut with an ellipsis
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
