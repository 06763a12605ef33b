//! Derived figures computed from a snapshot of the transaction list.

use chrono::{Duration, NaiveDate};

use crate::model::Transaction;

/// Number of rows shown in the recent transactions table.
pub const RECENT_LIMIT: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    // `Sum` for f64 starts from -0.0, which would print as "-0.0".
    let income = transactions
        .iter()
        .filter(|t| t.is_income())
        .fold(0.0, |acc, t| acc + t.amount);
    let expenses = transactions
        .iter()
        .filter(|t| t.is_expense())
        .fold(0.0, |acc, t| acc + t.amount);

    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RecentSpending {
    pub today: f64,
    pub week: f64,
}

/// Expense totals for `today` and for the seven days leading up to it
/// (inclusive of the day exactly one week ago). Undated transactions count
/// towards neither.
pub fn recent_window(transactions: &[Transaction], today: NaiveDate) -> RecentSpending {
    let week_start = today - Duration::days(7);

    transactions
        .iter()
        .filter(|t| t.is_expense())
        .fold(RecentSpending::default(), |mut acc, t| {
            let Some(date) = t.date else {
                return acc;
            };
            if date == today {
                acc.today += t.amount;
            }
            if date >= week_start {
                acc.week += t.amount;
            }
            acc
        })
}

/// Expense totals per category, in the order each category first appears.
pub fn by_category(transactions: &[Transaction]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();

    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        match totals
            .iter_mut()
            .find(|(category, _)| *category == transaction.category)
        {
            Some((_, total)) => *total += transaction.amount,
            None => totals.push((transaction.category.clone(), transaction.amount)),
        }
    }

    totals
}

/// The largest category total, or 1 when there is nothing positive to scale
/// against so callers can divide by it.
pub fn max_category_amount(categories: &[(String, f64)]) -> f64 {
    let max = categories
        .iter()
        .map(|(_, amount)| *amount)
        .fold(0.0, f64::max);

    if max > 0.0 {
        max
    } else {
        1.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Progress {
    pub income_percent: f64,
    pub expense_percent: f64,
}

pub fn progress(income: f64, expenses: f64, income_goal: f64, monthly_budget: f64) -> Progress {
    Progress {
        income_percent: percent_of(income, income_goal),
        expense_percent: percent_of(expenses, monthly_budget),
    }
}

fn percent_of(actual: f64, goal: f64) -> f64 {
    if goal <= 0.0 || !goal.is_finite() {
        return 0.0;
    }

    // Adding 0.0 turns a -0.0 quotient into 0.0.
    (actual / goal * 100.0).clamp(0.0, 100.0) + 0.0
}

/// The most recent transactions, newest date first, undated ones last.
/// Transactions sharing a date keep their insertion order.
pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}
