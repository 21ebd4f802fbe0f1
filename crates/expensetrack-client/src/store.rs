//! Durable transaction table plus its live snapshot feed.
//!
//! Writes on one store are serialized by the connection mutex. Each write
//! reads the post-write snapshot inside its own SQLite transaction, so a
//! snapshot is published only for a fully committed write, and snapshots are
//! published in write order.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Datelike, NaiveDate};
use rusqlite::{Connection, TransactionBehavior, params};

use crate::{ClientError, ClientResult};
use crate::live::{SnapshotFeed, Subscription};
use crate::model::{NewTransaction, Snapshot, Transaction};
use crate::setup::{PreparedStore, SetupContext, ensure_initialized, ensure_initialized_in_memory};
use crate::state::map_sqlite_error;

const SELECT_ALL_SQL: &str = "SELECT id, title, income, expense, date, category
     FROM expenses
     ORDER BY date DESC, id DESC";

// Dates are ordered as ISO text, which is only chronological for 4-digit years.
const MIN_STORABLE_YEAR: i32 = 0;
const MAX_STORABLE_YEAR: i32 = 9999;

pub struct TransactionStore {
    connection: Mutex<Connection>,
    context: SetupContext,
    feed: SnapshotFeed,
}

impl TransactionStore {
    /// Opens (creating and migrating if needed) the store under `home_override`,
    /// or the configured default home when `None`.
    pub fn open(home_override: Option<&Path>) -> ClientResult<Self> {
        Self::from_prepared(ensure_initialized(home_override)?)
    }

    pub fn open_in_memory() -> ClientResult<Self> {
        Self::from_prepared(ensure_initialized_in_memory()?)
    }

    fn from_prepared(prepared: PreparedStore) -> ClientResult<Self> {
        let PreparedStore {
            connection,
            context,
        } = prepared;
        let initial = read_snapshot(&connection, &context.db_path)?;
        tracing::info!(rows = initial.len(), "loaded initial snapshot");

        Ok(Self {
            connection: Mutex::new(connection),
            context,
            feed: SnapshotFeed::new(initial),
        })
    }

    pub fn context(&self) -> &SetupContext {
        &self.context
    }

    /// Stores `new` and returns its assigned id.
    pub fn insert(&self, new: &NewTransaction) -> ClientResult<i64> {
        check_storable_date(new.date)?;
        let db_path = self.context.db_path.as_path();
        let mut connection = self.lock_connection();
        let transaction = connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|error| map_sqlite_error(db_path, &error))?;

        transaction
            .execute(
                "INSERT INTO expenses (title, income, expense, date, category)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    &new.title,
                    new.income,
                    new.expense,
                    new.date,
                    &new.category
                ],
            )
            .map_err(|error| map_sqlite_error(db_path, &error))?;
        let id = transaction.last_insert_rowid();

        let snapshot = read_snapshot(&transaction, db_path)?;
        transaction
            .commit()
            .map_err(|error| map_sqlite_error(db_path, &error))?;

        tracing::info!(id, title = %new.title, "inserted transaction");
        self.feed.publish(snapshot);
        Ok(id)
    }

    /// Removes the transaction with `id`.
    ///
    /// Returns `Ok(false)` without publishing when no such transaction exists.
    pub fn delete(&self, id: i64) -> ClientResult<bool> {
        let db_path = self.context.db_path.as_path();
        let mut connection = self.lock_connection();
        let transaction = connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|error| map_sqlite_error(db_path, &error))?;

        let removed = transaction
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])
            .map_err(|error| map_sqlite_error(db_path, &error))?;
        if removed == 0 {
            tracing::debug!(id, "delete skipped; transaction not found");
            return Ok(false);
        }

        let snapshot = read_snapshot(&transaction, db_path)?;
        transaction
            .commit()
            .map_err(|error| map_sqlite_error(db_path, &error))?;

        tracing::info!(id, "deleted transaction");
        self.feed.publish(snapshot);
        Ok(true)
    }

    /// Reads every transaction straight from the table, newest date first.
    pub fn query_all(&self) -> ClientResult<Snapshot> {
        let connection = self.lock_connection();
        read_snapshot(&connection, &self.context.db_path)
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.feed.latest()
    }

    pub fn subscribe(&self) -> Subscription {
        self.feed.subscribe()
    }

    /// Ends live updates for every subscriber without closing the database.
    pub fn close_feed(&self) {
        self.feed.close();
    }

    pub fn close(self) -> ClientResult<()> {
        self.feed.close();
        let connection = self
            .connection
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        connection
            .close()
            .map_err(|(_, error)| map_sqlite_error(&self.context.db_path, &error))?;
        tracing::info!(db_path = %self.context.db_path.display(), "transaction store closed");
        Ok(())
    }

    fn lock_connection(&self) -> MutexGuard<'_, Connection> {
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn check_storable_date(date: NaiveDate) -> ClientResult<()> {
    if (MIN_STORABLE_YEAR..=MAX_STORABLE_YEAR).contains(&date.year()) {
        return Ok(());
    }
    Err(ClientError::validation_failed(
        "date",
        &format!(
            "Transaction dates must fall between years {MIN_STORABLE_YEAR} and {MAX_STORABLE_YEAR}."
        ),
    ))
}

fn read_snapshot(connection: &Connection, db_path: &Path) -> ClientResult<Snapshot> {
    let mut statement = connection
        .prepare_cached(SELECT_ALL_SQL)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let rows_iter = statement
        .query_map([], |row| {
            Ok(Transaction {
                id: row.get(0)?,
                title: row.get(1)?,
                income: row.get(2)?,
                expense: row.get(3)?,
                date: row.get(4)?,
                category: row.get(5)?,
            })
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut rows = Vec::new();
    for row in rows_iter {
        rows.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }

    Ok(Arc::from(rows))
}
