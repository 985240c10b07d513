//! Derived statistics
//!
//! Everything here is a pure function of the transaction list, the budgets
//! and a reference date. Nothing is stored.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{month_key, Category, Money, Transaction};

/// Totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    /// `YYYY-MM` label of the month
    pub month: String,
    pub income: Money,
    /// Sum of everything that isn't income
    pub spending: Money,
    /// `income - spending`
    pub net: Money,
    /// `monthly_budget - spending`, negative when over budget
    pub budget_remaining: Money,
    /// Spending per category identifier
    pub by_category: BTreeMap<String, Money>,
}

/// Compute statistics for the month containing `today`
pub fn compute_stats(
    expenses: &[Transaction],
    monthly_budget: Money,
    today: NaiveDate,
) -> MonthlyStats {
    let mut income = Money::zero();
    let mut spending = Money::zero();
    let mut by_category: BTreeMap<String, Money> = BTreeMap::new();

    for txn in expenses.iter().filter(|t| t.in_month_of(today)) {
        if txn.is_income() {
            income += txn.amount;
        } else {
            spending += txn.amount;
            *by_category.entry(txn.category.clone()).or_default() += txn.amount;
        }
    }

    MonthlyStats {
        month: month_key(today),
        income,
        spending,
        net: income - spending,
        budget_remaining: monthly_budget - spending,
        by_category,
    }
}

/// Spending against the limit of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBudgetStatus {
    pub category: Category,
    pub spent: Money,
    /// `None` when no limit (or a zero limit) is set
    pub limit: Option<Money>,
}

impl CategoryBudgetStatus {
    /// `limit - spent`, if a limit is set
    pub fn remaining(&self) -> Option<Money> {
        self.limit.map(|limit| limit - self.spent)
    }

    pub fn is_over(&self) -> bool {
        self.remaining().is_some_and(|r| r.is_negative())
    }
}

/// Status of every category in `categories`, in list order
pub fn category_statuses(
    stats: &MonthlyStats,
    category_budgets: &BTreeMap<String, Money>,
    categories: &[Category],
) -> Vec<CategoryBudgetStatus> {
    categories
        .iter()
        .map(|category| CategoryBudgetStatus {
            category: *category,
            spent: stats
                .by_category
                .get(category.value)
                .copied()
                .unwrap_or_default(),
            limit: category_budgets
                .get(category.value)
                .copied()
                .filter(|limit| limit.is_positive()),
        })
        .collect()
}

/// Share of the monthly budget already spent, in percent
///
/// Zero when no budget is set. Not capped: overspending gives more than 100.
pub fn budget_usage_percent(spending: Money, monthly_budget: Money) -> f64 {
    spending.percent_of(monthly_budget)
}

/// A category's spending and its share of the month's total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub spent: Money,
    pub percent: f64,
}

/// The `limit` categories with the highest spending this month
///
/// Ties are broken by category identifier.
pub fn top_categories(stats: &MonthlyStats, limit: usize) -> Vec<CategoryShare> {
    let mut totals: Vec<(&String, Money)> =
        stats.by_category.iter().map(|(c, m)| (c, *m)).collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    totals
        .into_iter()
        .take(limit)
        .map(|(category, spent)| CategoryShare {
            category: category.clone(),
            spent,
            percent: spent.percent_of(stats.spending),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpensePayload, CATEGORIES};
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()
    }

    fn txn(title: &str, amount: &str, kind: &str, category: &str, date: &str) -> Transaction {
        Transaction::from_payload(
            ExpensePayload::new(title, amount)
                .kind(kind)
                .category(category)
                .date(date),
            today(),
            Utc::now(),
        )
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("Paycheck", "1000", "income", "salary", "2025-04-01"),
            txn("Rent", "400", "expense", "housing", "2025-04-02"),
            txn("Lunch", "12.50", "expense", "food", "2025-04-03"),
            txn("Dinner", "17.50", "expense", "food", "2025-04-30"),
            txn("Old rent", "400", "expense", "housing", "2025-03-31"),
            txn("Next month", "99", "expense", "food", "2025-05-01"),
            txn("Last year", "50", "expense", "food", "2024-04-10"),
        ]
    }

    #[test]
    fn test_empty_list() {
        let stats = compute_stats(&[], Money::from_cents(200_000), today());

        assert_eq!(stats.month, "2025-04");
        assert!(stats.income.is_zero());
        assert!(stats.spending.is_zero());
        assert!(stats.net.is_zero());
        assert_eq!(stats.budget_remaining, Money::from_cents(200_000));
        assert!(stats.by_category.is_empty());
    }

    #[test]
    fn test_only_current_month_counts() {
        let stats = compute_stats(&sample(), Money::from_cents(200_000), today());

        assert_eq!(stats.income, Money::from_cents(100_000));
        assert_eq!(stats.spending, Money::from_cents(43_000));
        assert_eq!(stats.net, Money::from_cents(57_000));
        assert_eq!(stats.budget_remaining, Money::from_cents(157_000));
    }

    #[test]
    fn test_by_category_excludes_income() {
        let stats = compute_stats(&sample(), Money::zero(), today());

        assert_eq!(stats.by_category.get("food"), Some(&Money::from_cents(3000)));
        assert_eq!(stats.by_category.get("housing"), Some(&Money::from_cents(40_000)));
        assert!(!stats.by_category.contains_key("salary"));
    }

    #[test]
    fn test_identities_hold() {
        for budget in [0, 10_000, 200_000] {
            let budget = Money::from_cents(budget);
            let stats = compute_stats(&sample(), budget, today());

            assert_eq!(stats.net, stats.income - stats.spending);
            assert_eq!(stats.budget_remaining, budget - stats.spending);
            let category_total: Money = stats.by_category.values().copied().sum();
            assert_eq!(category_total, stats.spending);
        }
    }

    #[test]
    fn test_over_budget_goes_negative() {
        let stats = compute_stats(&sample(), Money::from_cents(10_000), today());
        assert_eq!(stats.budget_remaining, Money::from_cents(-33_000));
    }

    #[test]
    fn test_category_statuses() {
        let stats = compute_stats(&sample(), Money::zero(), today());
        let mut budgets = BTreeMap::new();
        budgets.insert("food".to_string(), Money::from_cents(5000));
        budgets.insert("housing".to_string(), Money::from_cents(30_000));
        budgets.insert("health".to_string(), Money::zero());

        let statuses = category_statuses(&stats, &budgets, CATEGORIES);
        assert_eq!(statuses.len(), CATEGORIES.len());

        let food = statuses.iter().find(|s| s.category.value == "food").unwrap();
        assert_eq!(food.remaining(), Some(Money::from_cents(2000)));
        assert!(!food.is_over());

        let housing = statuses.iter().find(|s| s.category.value == "housing").unwrap();
        assert!(housing.is_over());

        let health = statuses.iter().find(|s| s.category.value == "health").unwrap();
        assert_eq!(health.limit, None);
        assert_eq!(health.remaining(), None);
        assert!(!health.is_over());
    }

    #[test]
    fn test_budget_usage_percent() {
        assert_eq!(
            budget_usage_percent(Money::from_cents(50_000), Money::from_cents(200_000)),
            25.0
        );
        assert_eq!(budget_usage_percent(Money::from_cents(50_000), Money::zero()), 0.0);
        assert_eq!(
            budget_usage_percent(Money::from_cents(300), Money::from_cents(200)),
            150.0
        );
    }

    #[test]
    fn test_top_categories() {
        let mut expenses = sample();
        expenses.push(txn("Bus", "30", "expense", "transport", "2025-04-05"));
        let stats = compute_stats(&expenses, Money::zero(), today());

        let top = top_categories(&stats, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].category, "housing");
        // food and transport tie at 30.00, identifier order decides
        assert_eq!(top[1].category, "food");
        assert_eq!(top[1].spent, Money::from_cents(3000));

        let total: f64 = top_categories(&stats, 10).iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }
}
