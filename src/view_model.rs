//! Everything the pages display, computed up front so rendering is a plain
//! walk over this data.

use chrono::NaiveDate;

use crate::{
    aggregate::{self, Progress, Totals, RECENT_LIMIT},
    model::{Transaction, TransactionType},
    settings::Settings,
};

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardView {
    pub currency: String,
    pub totals: Totals,
    pub income_label: String,
    pub expenses_label: String,
    pub today_label: String,
    pub week_label: String,
    pub rows: Vec<TransactionRow>,
    pub categories: Vec<CategoryBar>,
    pub progress: Progress,
    pub income_progress_label: String,
    pub expense_progress_label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub amount_label: String,
    pub type_class: &'static str,
    pub type_label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryBar {
    pub category: String,
    pub bar_label: String,
    pub summary_label: String,
    /// Share of the largest category, 0 to 100.
    pub height_percent: f64,
}

impl DashboardView {
    pub fn build(transactions: &[Transaction], settings: &Settings, today: NaiveDate) -> Self {
        let symbol = settings.currency.as_str();
        let totals = aggregate::totals(transactions);
        let spending = aggregate::recent_window(transactions, today);
        let progress = aggregate::progress(
            totals.income,
            totals.expenses,
            settings.income_goal,
            settings.monthly_budget,
        );

        tracing::debug!(
            income = totals.income,
            expenses = totals.expenses,
            balance = totals.balance,
            "Calculated balance"
        );

        let rows = aggregate::recent(transactions, RECENT_LIMIT)
            .into_iter()
            .map(|t| TransactionRow {
                id: t.id,
                date: t
                    .date
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                amount_label: format!("{}{}", symbol, format_decimal(t.amount)),
                type_class: match t.kind {
                    TransactionType::Income => "type-income",
                    TransactionType::Expense => "type-expense",
                },
                type_label: t.kind.as_str().to_uppercase(),
                category: t.category,
            })
            .collect();

        let by_category = aggregate::by_category(transactions);
        let max_amount = aggregate::max_category_amount(&by_category);
        let categories = by_category
            .into_iter()
            .map(|(category, amount)| CategoryBar {
                category,
                bar_label: format_whole_currency(amount, symbol),
                summary_label: format!("{}{}", symbol, format_decimal(amount)),
                height_percent: amount / max_amount * 100.0,
            })
            .collect();

        Self {
            currency: settings.currency.clone(),
            totals,
            income_label: format_currency(totals.income, symbol),
            expenses_label: format_currency(totals.expenses, symbol),
            today_label: format_whole_currency(spending.today, symbol),
            week_label: format_whole_currency(spending.week, symbol),
            rows,
            categories,
            progress,
            income_progress_label: format!(
                "{:.1}% of goal ({}{})",
                progress.income_percent,
                symbol,
                format_threshold(settings.income_goal)
            ),
            expense_progress_label: format!(
                "{:.1}% of budget ({}{})",
                progress.expense_percent,
                symbol,
                format_threshold(settings.monthly_budget)
            ),
        }
    }
}

pub fn format_with_commas(value: i64) -> String {
    let is_negative = value < 0;
    let s = value.unsigned_abs().to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    let formatted: String = out.into_iter().rev().collect();
    if is_negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// `1234.5` -> `1,234.50`, sign dropped.
fn format_decimal(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    format!("{}.{:02}", format_with_commas(cents / 100), cents % 100)
}

/// Thousands separators and two decimals, sign ahead of the symbol.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 && (amount * 100.0).round() != 0.0 {
        "-"
    } else {
        ""
    };
    format!("{}{}{}", sign, symbol, format_decimal(amount))
}

pub fn format_whole_currency(amount: f64, symbol: &str) -> String {
    let whole = amount.round() as i64;
    let sign = if whole < 0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol, format_with_commas(whole.abs()))
}

/// Whole thresholds print without decimals.
fn format_threshold(value: f64) -> String {
    if value.fract() == 0.0 {
        format_with_commas(value as i64)
    } else {
        format_decimal(value)
    }
}
