//! Replay-latest broadcast of store snapshots.
//!
//! A new [`Subscription`] first yields the snapshot that was current when it
//! subscribed, then every snapshot published afterwards, in publish order,
//! until it is dropped or the feed is closed.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use crate::model::Snapshot;

const FEED_CAPACITY: usize = 32;

pub struct SnapshotFeed {
    state: Mutex<FeedState>,
}

struct FeedState {
    latest: Snapshot,
    sender: Option<broadcast::Sender<Snapshot>>,
}

impl SnapshotFeed {
    pub fn new(initial: Snapshot) -> Self {
        let (sender, _receiver) = broadcast::channel(FEED_CAPACITY);
        Self {
            state: Mutex::new(FeedState {
                latest: initial,
                sender: Some(sender),
            }),
        }
    }

    pub fn latest(&self) -> Snapshot {
        self.lock().latest.clone()
    }

    pub fn publish(&self, snapshot: Snapshot) {
        let mut state = self.lock();
        state.latest = snapshot.clone();
        if let Some(sender) = &state.sender {
            // No receivers is fine; the snapshot is still kept as `latest`.
            let receivers = sender.send(snapshot).unwrap_or(0);
            tracing::debug!(
                rows = state.latest.len(),
                receivers,
                "published snapshot"
            );
        }
    }

    pub fn subscribe(&self) -> Subscription {
        // Holding the lock keeps `latest` and the receiver position in step
        // with `publish`.
        let state = self.lock();
        Subscription {
            pending: Some(state.latest.clone()),
            receiver: state.sender.as_ref().map(broadcast::Sender::subscribe),
        }
    }

    /// Ends the feed. Subscribers drain what was already sent, then see the end.
    pub fn close(&self) {
        self.lock().sender = None;
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock()
            .sender
            .as_ref()
            .map_or(0, broadcast::Sender::receiver_count)
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct Subscription {
    pending: Option<Snapshot>,
    receiver: Option<broadcast::Receiver<Snapshot>>,
}

impl Subscription {
    /// Waits for the next snapshot. `None` once the feed has closed.
    pub async fn next(&mut self) -> Option<Snapshot> {
        if let Some(snapshot) = self.pending.take() {
            return Some(snapshot);
        }

        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "subscriber lagged; resuming at oldest retained");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Returns a snapshot if one is ready, without waiting.
    pub fn try_next(&mut self) -> Option<Snapshot> {
        if let Some(snapshot) = self.pending.take() {
            return Some(snapshot);
        }

        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.try_recv() {
                Ok(snapshot) => return Some(snapshot),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "subscriber lagged; resuming at oldest retained");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}
