use std::sync::Arc;

use tokio::task::{self, JoinHandle};

use crate::aggregate::{Summary, summarize};
use crate::entry::{EntryDraft, validate_entry};
use crate::live::Subscription;
use crate::model::{NewTransaction, Snapshot};
use crate::store::TransactionStore;
use crate::{ClientError, ClientResult};

/// Cloneable async front for a [`TransactionStore`].
///
/// Writes run on tokio's blocking pool so the calling task (typically a
/// render loop) never waits on SQLite. Callers that do not need the result
/// can drop the returned [`JoinHandle`] and watch a [`Subscription`] instead.
#[derive(Clone)]
pub struct StoreHandle {
    store: Arc<TransactionStore>,
}

impl StoreHandle {
    pub fn new(store: TransactionStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn spawn_insert(&self, new: NewTransaction) -> JoinHandle<ClientResult<i64>> {
        let store = Arc::clone(&self.store);
        task::spawn_blocking(move || store.insert(&new))
    }

    pub fn spawn_delete(&self, id: i64) -> JoinHandle<ClientResult<bool>> {
        let store = Arc::clone(&self.store);
        task::spawn_blocking(move || store.delete(id))
    }

    pub async fn insert(&self, new: NewTransaction) -> ClientResult<i64> {
        join(self.spawn_insert(new)).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<bool> {
        join(self.spawn_delete(id)).await
    }

    /// Validates a form draft and stores it. Invalid drafts never reach the store.
    pub async fn submit(&self, draft: &EntryDraft) -> ClientResult<i64> {
        let new = validate_entry(draft)?;
        self.insert(new).await
    }

    pub fn subscribe(&self) -> Subscription {
        self.store.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.store.snapshot())
    }

    /// Closes the store once this is the last handle; otherwise only ends the
    /// live feed and leaves the connection to the remaining handles.
    pub fn close(self) -> ClientResult<()> {
        match Arc::try_unwrap(self.store) {
            Ok(store) => store.close(),
            Err(shared) => {
                shared.close_feed();
                Ok(())
            }
        }
    }
}

async fn join<T>(handle: JoinHandle<ClientResult<T>>) -> ClientResult<T> {
    handle
        .await
        .map_err(|error| ClientError::internal_task_failed(&error.to_string()))?
}
