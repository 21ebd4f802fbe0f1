use std::path::Path;

use crate::ClientResult;
use crate::aggregate::summarize;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::store::TransactionStore;

pub fn run(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let store = TransactionStore::open(home_override)?;
    let summary = summarize(&store.query_all()?);
    store.close()?;
    success("summary", summary)
}
