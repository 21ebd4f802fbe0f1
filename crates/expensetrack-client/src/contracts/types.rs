use serde::Serialize;

use crate::aggregate::{Summary, format_amount};
use crate::entry::format_display_date;
use crate::model::Transaction;

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub title: String,
    pub kind: String,
    pub income: f64,
    pub expense: f64,
    pub amount: String,
    pub date: String,
    pub display_date: String,
    pub category: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(row: &Transaction) -> Self {
        let (kind, amount) = if row.is_income() {
            ("income", row.income)
        } else {
            ("expense", row.expense)
        };
        Self {
            id: row.id,
            title: row.title.clone(),
            kind: kind.to_string(),
            income: row.income,
            expense: row.expense,
            amount: format_amount(amount),
            date: row.date.to_string(),
            display_date: format_display_date(row.date),
            category: row.category.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionsData {
    pub summary: Summary,
    pub rows: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddData {
    pub id: i64,
    pub message: String,
    pub transaction: TransactionRow,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteData {
    pub id: i64,
    pub message: String,
    pub summary: Summary,
}
