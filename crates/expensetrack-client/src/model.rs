use std::sync::Arc;

use chrono::NaiveDate;

/// The full ordered set of transactions at one point in time.
///
/// Snapshots are immutable once published; later writes produce a new one.
pub type Snapshot = Arc<[Transaction]>;

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    pub income: f64,
    pub expense: f64,
    pub date: NaiveDate,
    pub category: String,
}

/// A transaction that has not been stored yet. The store assigns its id.
///
/// `date` must fall in years 0 through 9999; the store rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub title: String,
    pub income: f64,
    pub expense: f64,
    pub date: NaiveDate,
    pub category: String,
}

impl NewTransaction {
    pub fn income(title: &str, amount: f64, date: NaiveDate, category: &str) -> Self {
        Self {
            title: title.to_string(),
            income: amount,
            expense: 0.0,
            date,
            category: category.to_string(),
        }
    }

    pub fn expense(title: &str, amount: f64, date: NaiveDate, category: &str) -> Self {
        Self {
            title: title.to_string(),
            income: 0.0,
            expense: amount,
            date,
            category: category.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_id(self, id: i64) -> Transaction {
        Transaction {
            id,
            title: self.title,
            income: self.income,
            expense: self.expense,
            date: self.date,
            category: self.category,
        }
    }
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.income > 0.0
    }

    /// True when every field except `id` equals `other`.
    pub fn same_contents(&self, other: &NewTransaction) -> bool {
        self.title == other.title
            && self.income == other.income
            && self.expense == other.expense
            && self.date == other.date
            && self.category == other.category
    }
}

pub fn empty_snapshot() -> Snapshot {
    Arc::from(Vec::new())
}
