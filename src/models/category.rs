//! Category enumeration
//!
//! Categories are a fixed list of `{value, label}` pairs. Transactions and
//! category budgets refer to them by `value`.

use serde::Serialize;

/// A spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Stable identifier stored on transactions
    pub value: &'static str,
    /// Human-readable name
    pub label: &'static str,
}

/// All known categories. The first one is the default for new entries.
pub const CATEGORIES: &[Category] = &[
    Category { value: "food", label: "Food & Dining" },
    Category { value: "transport", label: "Transport" },
    Category { value: "housing", label: "Housing & Rent" },
    Category { value: "utilities", label: "Utilities" },
    Category { value: "shopping", label: "Shopping" },
    Category { value: "entertainment", label: "Entertainment" },
    Category { value: "health", label: "Health" },
    Category { value: "education", label: "Education" },
    Category { value: "salary", label: "Salary" },
    Category { value: "other", label: "Other" },
];

/// Identifier assigned when an entry has no category
pub fn default_category() -> &'static str {
    CATEGORIES.first().map(|c| c.value).unwrap_or("other")
}

/// Look up a category by identifier or (case-insensitive) label
pub fn find_category(identifier: &str) -> Option<&'static Category> {
    let identifier = identifier.trim();
    CATEGORIES
        .iter()
        .find(|c| c.value == identifier)
        .or_else(|| {
            CATEGORIES
                .iter()
                .find(|c| c.label.eq_ignore_ascii_case(identifier))
        })
}

/// Label for a category identifier, falling back to the identifier itself
/// for ones that are no longer in the list
pub fn category_label(value: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|c| c.value == value)
        .map(|c| c.label)
        .unwrap_or(value)
}
