use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const ADD_HELP_COMMAND: &str = "expensetrack add --help";

/// Broad classification of [`ClientError`] codes, used by callers that only
/// care whether to show a notice, report a storage failure, or ignore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Persistence,
    NotFound,
    Internal,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        match self.code.as_str() {
            "validation_failed" | "invalid_argument" => ErrorKind::Validation,
            "transaction_not_found" => ErrorKind::NotFound,
            code if code.starts_with("internal_") => ErrorKind::Internal,
            _ => ErrorKind::Persistence,
        }
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::new(
            "invalid_argument",
            message,
            vec!["Run `expensetrack --help` for usage.".to_string()],
        )
    }

    pub fn validation_failed(field: &str, message: &str) -> Self {
        Self::new(
            "validation_failed",
            message,
            vec![
                format!("Fix the `{field}` value and submit again."),
                format!("Run `{ADD_HELP_COMMAND}` to review field rules."),
            ],
        )
        .with_data(json!({
            "field": field,
        }))
    }

    pub fn transaction_not_found(id: i64) -> Self {
        Self::new(
            "transaction_not_found",
            &format!("Transaction {id} was not found."),
            vec!["Run `expensetrack list` to find a valid transaction id.".to_string()],
        )
        .with_data(json!({
            "id": id,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn internal_task_failed(message: &str) -> Self {
        Self::new("internal_task_failed", message, Vec::new())
    }

    pub fn store_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_permission_denied",
            &format!("Cannot open transaction store at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `EXPENSETRACK_HOME` to a writable directory."
            )],
        )
    }

    pub fn store_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_locked",
            &format!("Transaction store is locked at `{location}`."),
            vec![
                format!("Close other processes using `{location}` so the lock is released."),
                "Submit the transaction again.".to_string(),
            ],
        )
    }

    pub fn store_full(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_full",
            &format!("No space left to write the transaction store at `{location}`."),
            vec![
                "Free up disk space.".to_string(),
                "Submit the transaction again.".to_string(),
            ],
        )
    }

    pub fn store_read_only(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_read_only",
            &format!("Transaction store at `{location}` is read-only."),
            vec![format!("Grant write access to `{location}`.")],
        )
    }

    pub fn store_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_corrupt",
            &format!("Transaction store appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid SQLite store file or restore from backup."
            )],
        )
    }

    pub fn store_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_write_failed",
            &format!("Writing to the transaction store at `{location}` failed: {detail}"),
            vec!["Submit the transaction again.".to_string()],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Store migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn store_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_failed",
            &format!("Transaction store initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{ClientError, ErrorKind};

    #[test]
    fn kind_classifies_codes() {
        assert_eq!(
            ClientError::validation_failed("amount", "bad").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ClientError::invalid_argument("bad").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ClientError::transaction_not_found(7).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ClientError::store_full(Path::new("/tmp/expenses.db")).kind(),
            ErrorKind::Persistence
        );
        assert_eq!(
            ClientError::internal_serialization("oops").kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn validation_error_records_field() {
        let error = ClientError::validation_failed("title", "Please fill all fields");
        assert_eq!(error.to_string(), "Please fill all fields");
        assert_eq!(
            error.data.as_ref().and_then(|data| data.get("field")).cloned(),
            Some(serde_json::Value::String("title".to_string()))
        );
    }
}
