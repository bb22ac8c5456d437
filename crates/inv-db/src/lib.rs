//! # inv-db
//!
//! libSQL database operations for the device inventory.
//!
//! Handles all relational state: users, suppliers, customers, purchase and
//! sales orders, devices, parts, and the two append-only ledgers. Every
//! device or part write appends its ledger rows inside the same libSQL
//! transaction, so a failed ledger write rejects the whole change.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and connection. Repositories live on
/// [`service::InventoryService`].
pub struct InventoryDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl InventoryDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let inv_db = Self { db, conn };
        inv_db.run_migrations().await?;
        tracing::debug!(path, "inventory database opened");
        Ok(inv_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"dev-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        helpers::generate_id(&self.conn, prefix).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> InventoryDb {
        InventoryDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "users",
            "suppliers",
            "customers",
            "purchase_orders",
            "sales_orders",
            "devices",
            "device_transactions",
            "parts",
            "part_transactions",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("dev").await.unwrap();
        assert!(id.starts_with("dev-"), "ID should start with 'dev-': {id}");
        assert_eq!(id.len(), 12, "ID should be 3 prefix + 1 dash + 8 hex: {id}");

        let hex_part = &id[4..];
        assert!(
            hex_part.chars().all(|c| c.is_ascii_hexdigit()),
            "Random part should be hex: {hex_part}"
        );
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in inv_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn device_requires_exactly_one_identifier() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO users (id, display_name) VALUES ('usr-t1', 'Tester')",
                (),
            )
            .await
            .unwrap();

        let both = db
            .conn()
            .execute(
                "INSERT INTO devices (id, imei, serial_number, manufacturer, model, status, created_by, updated_by)
                 VALUES ('dev-t1', '490154203237518', 'SN1', 'Apple', 'iPhone', 'in_stock', 'usr-t1', 'usr-t1')",
                (),
            )
            .await;
        assert!(both.is_err(), "both identifiers must be rejected");

        let neither = db
            .conn()
            .execute(
                "INSERT INTO devices (id, manufacturer, model, status, created_by, updated_by)
                 VALUES ('dev-t2', 'Apple', 'iPhone', 'in_stock', 'usr-t1', 'usr-t1')",
                (),
            )
            .await;
        assert!(neither.is_err(), "missing identifier must be rejected");
    }

    #[tokio::test]
    async fn part_ledger_check_rejects_mismatched_delta() {
        let db = test_db().await;
        db.conn()
            .execute_batch(
                "INSERT INTO users (id, display_name) VALUES ('usr-t1', 'Tester');
                 INSERT INTO parts (id, sku, name, quantity, created_by, updated_by)
                 VALUES ('prt-t1', 'SCR-1', 'Screen', 5, 'usr-t1', 'usr-t1');",
            )
            .await
            .unwrap();

        let result = db
            .conn()
            .execute(
                "INSERT INTO part_transactions (id, part_id, kind, previous_quantity, new_quantity, quantity_change, reference_id, performed_by)
                 VALUES ('ptx-t1', 'prt-t1', 'usage', 5, 3, 1, 'prt-t1', 'usr-t1')",
                (),
            )
            .await;
        assert!(result.is_err(), "CHECK must enforce |new - previous| == change");
    }
}
