pub mod aggregate;
pub mod commands;
pub mod contracts;
pub mod entry;
pub mod error;
pub mod handle;
pub mod live;
pub mod migrations;
pub mod model;
pub mod setup;
pub mod state;
pub mod store;

pub use aggregate::{Summary, balance, summarize, total_expense, transaction_count};
pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use entry::{EntryDraft, EntryKind, validate_entry};
pub use error::{ClientError, ClientResult, ErrorKind};
pub use handle::StoreHandle;
pub use live::Subscription;
pub use model::{NewTransaction, Snapshot, Transaction};
pub use store::TransactionStore;

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
