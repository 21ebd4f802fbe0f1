use std::path::Path;

use crate::ClientResult;
use crate::aggregate::summarize;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{TransactionRow, TransactionsData};
use crate::store::TransactionStore;

pub fn run(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let store = TransactionStore::open(home_override)?;
    let snapshot = store.query_all()?;
    let data = TransactionsData {
        summary: summarize(&snapshot),
        rows: snapshot.iter().map(TransactionRow::from).collect(),
    };
    store.close()?;
    success("list", data)
}
