use std::path::Path;

use crate::aggregate::summarize;
use crate::commands::common::open_handle;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::DeleteData;
use crate::{ClientError, ClientResult};

pub async fn run(home_override: Option<&Path>, id: i64) -> ClientResult<SuccessEnvelope> {
    let handle = open_handle(home_override)?;
    let deleted = handle.delete(id).await?;
    if !deleted {
        handle.close()?;
        return Err(ClientError::transaction_not_found(id));
    }

    let data = DeleteData {
        id,
        message: format!("Transaction {id} deleted."),
        summary: summarize(&handle.snapshot()),
    };
    handle.close()?;
    success("delete", data)
}
