//! Supplier and customer repository.
//!
//! Both tables share one shape (`id`, `name`, `created_at`) and are looked up
//! find-or-create by case-insensitive name.

use chrono::{DateTime, Utc};

use inv_core::entities::{Customer, Supplier};
use inv_core::ids::{PREFIX_CUSTOMER, PREFIX_SUPPLIER};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, now_utc, parse_datetime, require_text};
use crate::service::InventoryService;

struct NamedRow {
    id: String,
    name: String,
    created_at: DateTime<Utc>,
}

fn row_to_named(row: &libsql::Row) -> Result<NamedRow, DatabaseError> {
    Ok(NamedRow {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
    })
}

impl From<NamedRow> for Supplier {
    fn from(row: NamedRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl From<NamedRow> for Customer {
    fn from(row: NamedRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl InventoryService {
    /// Return the supplier with this name, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank name.
    pub async fn find_or_create_supplier(&self, name: &str) -> Result<Supplier, DatabaseError> {
        self.find_or_create_named("suppliers", PREFIX_SUPPLIER, name)
            .await
            .map(Supplier::from)
    }

    /// Return the customer with this name, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank name.
    pub async fn find_or_create_customer(&self, name: &str) -> Result<Customer, DatabaseError> {
        self.find_or_create_named("customers", PREFIX_CUSTOMER, name)
            .await
            .map(Customer::from)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the supplier does not exist.
    pub async fn get_supplier(&self, id: &str) -> Result<Supplier, DatabaseError> {
        self.get_named("suppliers", id).await.map(Supplier::from)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the customer does not exist.
    pub async fn get_customer(&self, id: &str) -> Result<Customer, DatabaseError> {
        self.get_named("customers", id).await.map(Customer::from)
    }

    async fn get_named(&self, table: &str, id: &str) -> Result<NamedRow, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT id, name, created_at FROM {table} WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_named(&row)
    }

    async fn find_or_create_named(
        &self,
        table: &str,
        prefix: &str,
        name: &str,
    ) -> Result<NamedRow, DatabaseError> {
        require_text("name", name)?;
        let name = name.trim();

        let _guard = self.lock_writes().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT id, name, created_at FROM {table} WHERE name = ?1"),
                [name],
            )
            .await?;
        if let Some(row) = rows.next().await? {
            return row_to_named(&row);
        }

        let now = now_utc();
        let id = self.db().generate_id(prefix).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO {table} (id, name, created_at) VALUES (?1, ?2, ?3)"),
                libsql::params![id.as_str(), name, format_datetime(now)],
            )
            .await?;
        tracing::debug!(table, id = %id, "counterparty created");

        Ok(NamedRow {
            id,
            name: name.to_string(),
            created_at: now,
        })
    }
}
