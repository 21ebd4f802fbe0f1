//! Figures derived from a snapshot. Everything is recomputed from scratch.

use serde::Serialize;

use crate::model::Transaction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub balance: String,
    pub total_income: String,
    pub total_expense: String,
    pub transaction_count: usize,
}

pub fn summarize(snapshot: &[Transaction]) -> Summary {
    Summary {
        balance: balance(snapshot),
        total_income: total_income(snapshot),
        total_expense: total_expense(snapshot),
        transaction_count: transaction_count(snapshot),
    }
}

/// Sum of income minus sum of expense, to two decimals.
pub fn balance(snapshot: &[Transaction]) -> String {
    format_amount(sum_income(snapshot) - sum_expense(snapshot))
}

pub fn total_income(snapshot: &[Transaction]) -> String {
    format_amount(sum_income(snapshot))
}

pub fn total_expense(snapshot: &[Transaction]) -> String {
    format_amount(sum_expense(snapshot))
}

pub fn transaction_count(snapshot: &[Transaction]) -> usize {
    snapshot.len()
}

pub fn format_amount(value: f64) -> String {
    let formatted = format!("{value:.2}");
    // Rounding a tiny negative value must not print "-0.00".
    if formatted == "-0.00" {
        return "0.00".to_string();
    }
    formatted
}

fn sum_income(snapshot: &[Transaction]) -> f64 {
    snapshot.iter().map(|row| row.income).sum()
}

fn sum_expense(snapshot: &[Transaction]) -> f64 {
    snapshot.iter().map(|row| row.expense).sum()
}
