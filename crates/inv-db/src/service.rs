//! Service layer orchestrating inventory mutations with their ledger rows.
//!
//! `InventoryService` wraps `InventoryDb`. All repo methods are implemented as
//! `impl InventoryService` blocks in [`crate::repos`].

use std::ops::Deref;

use tokio::sync::{Mutex, MutexGuard};

use crate::InventoryDb;
use crate::error::DatabaseError;

/// Orchestrates database mutations together with the append-only ledgers.
///
/// Every mutation method follows this protocol:
/// 1. Begin transaction
/// 2. Read the prior row state
/// 3. Execute SQL
/// 4. Append ledger rows (inside transaction)
/// 5. Commit, or roll back if any step failed
///
/// Writes share one connection, so they are serialized by `write_lock`.
/// Concurrent writers queue rather than nesting inside each other's
/// transaction; the last one to commit wins.
pub struct InventoryService {
    db: InventoryDb,
    write_lock: Mutex<()>,
}

/// An open write transaction. Holds the service write lock until it is
/// passed to [`finish`].
pub(crate) struct WriteTx<'a> {
    tx: libsql::Transaction,
    _guard: MutexGuard<'a, ()>,
}

impl Deref for WriteTx<'_> {
    type Target = libsql::Transaction;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

impl InventoryService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = InventoryDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Create from an existing `InventoryDb`.
    #[must_use]
    pub fn from_db(db: InventoryDb) -> Self {
        Self {
            db,
            write_lock: Mutex::new(()),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &InventoryDb {
        &self.db
    }

    /// Wait for exclusive write access. Autocommit writes hold the guard for
    /// their whole read-then-write sequence.
    pub(crate) async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Open a write transaction on the service connection.
    pub(crate) async fn begin(&self) -> Result<WriteTx<'_>, DatabaseError> {
        let guard = self.lock_writes().await;
        let tx = self.db.conn().transaction().await?;
        Ok(WriteTx { tx, _guard: guard })
    }
}

/// Commit `tx` if `result` is `Ok`, otherwise roll it back and return the
/// original error.
pub(crate) async fn finish<T>(
    tx: WriteTx<'_>,
    result: Result<T, DatabaseError>,
) -> Result<T, DatabaseError> {
    let WriteTx { tx, _guard } = tx;
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "rollback failed after {err}");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;

    async fn count_users(svc: &InventoryService) -> i64 {
        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM users", ())
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
    }

    #[tokio::test]
    async fn finish_commits_ok_results() {
        let svc = test_service().await;
        let tx = svc.begin().await.unwrap();
        tx.execute(
            "INSERT INTO users (id, display_name) VALUES ('usr-c0ffee01', 'Kept')",
            (),
        )
        .await
        .unwrap();
        finish(tx, Ok(())).await.unwrap();

        assert_eq!(count_users(&svc).await, 1);
    }

    #[tokio::test]
    async fn finish_rolls_back_on_error() {
        let svc = test_service().await;
        let tx = svc.begin().await.unwrap();
        tx.execute(
            "INSERT INTO users (id, display_name) VALUES ('usr-c0ffee02', 'Dropped')",
            (),
        )
        .await
        .unwrap();
        let result: Result<(), _> =
            finish(tx, Err(DatabaseError::Validation("nope".into()))).await;

        assert!(matches!(result, Err(DatabaseError::Validation(_))));
        assert_eq!(count_users(&svc).await, 0);
    }
}
