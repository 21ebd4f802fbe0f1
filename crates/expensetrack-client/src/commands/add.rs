use std::path::Path;

use crate::aggregate::summarize;
use crate::commands::common::open_handle;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{AddData, TransactionRow};
use crate::entry::EntryDraft;
use crate::{ClientError, ClientResult};

/// Submits a form draft, then waits for the store to publish the snapshot
/// that contains it, the way a screen re-renders after adding an entry.
pub async fn run(home_override: Option<&Path>, draft: &EntryDraft) -> ClientResult<SuccessEnvelope> {
    let handle = open_handle(home_override)?;
    let mut subscription = handle.subscribe();
    // Drop the replayed pre-insert snapshot.
    let _ = subscription.next().await;

    let id = handle.submit(draft).await?;
    let snapshot = subscription.next().await.ok_or_else(|| {
        ClientError::internal_task_failed("Live feed closed before the new transaction arrived.")
    })?;
    let transaction = snapshot
        .iter()
        .find(|row| row.id == id)
        .map(TransactionRow::from)
        .ok_or_else(|| {
            ClientError::internal_task_failed("Inserted transaction missing from snapshot.")
        })?;

    let data = AddData {
        id,
        message: format!("{} added!", draft.kind.label()),
        transaction,
        summary: summarize(&snapshot),
    };
    handle.close()?;
    success("add", data)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use tempfile::tempdir;

    use super::run;
    use crate::entry::{EntryDraft, EntryKind};

    #[tokio::test]
    async fn add_reports_new_row_and_updated_summary() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let draft = EntryDraft {
                title: "Salary".to_string(),
                amount: "50000".to_string(),
                category: "Income".to_string(),
                date: "01/06/2025".to_string(),
                kind: EntryKind::Income,
            };

            let result = run(Some(temp_dir.path()), &draft).await;
            assert!(result.is_ok());
            if let Ok(envelope) = result {
                assert_eq!(envelope.command, "add");
                assert_eq!(
                    envelope.data["message"],
                    Value::String("Income added!".to_string())
                );
                assert_eq!(
                    envelope.data["summary"]["balance"],
                    Value::String("50000.00".to_string())
                );
                assert_eq!(
                    envelope.data["transaction"]["display_date"],
                    Value::String("01/06/2025".to_string())
                );
            }
        }
    }
}
