//! Part repository and the part quantity ledger.

use inv_core::entities::{Part, PartHistoryEntry, PartTransaction};
use inv_core::enums::PartMovement;
use inv_core::ids::{PREFIX_PART, PREFIX_PART_TRANSACTION};
use inv_core::ledger::validate_quantity_change;

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, generate_id, get_opt_string, now_utc, parse_datetime, parse_enum,
    require_text,
};
use crate::service::{InventoryService, finish};
use crate::updates::part::{NewPart, PartAdjustment};

const SELECT_COLS: &str = "id, sku, name, quantity, created_by, updated_by, created_at, updated_at";

fn row_to_part(row: &libsql::Row) -> Result<Part, DatabaseError> {
    Ok(Part {
        id: row.get::<String>(0)?,
        sku: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        quantity: row.get::<i64>(3)?,
        created_by: row.get::<String>(4)?,
        updated_by: row.get::<String>(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

async fn load_part(conn: &libsql::Connection, id: &str) -> Result<Part, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM parts WHERE id = ?1"), [id])
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    row_to_part(&row)
}

async fn append_part_transaction(
    conn: &libsql::Connection,
    part_id: &str,
    previous_quantity: i64,
    adjustment: &PartAdjustment,
    actor: &str,
) -> Result<PartTransaction, DatabaseError> {
    validate_quantity_change(
        previous_quantity,
        adjustment.new_quantity,
        adjustment.quantity_change,
    )?;
    require_text("reference_id", &adjustment.reference_id)?;
    require_text("actor", actor)?;

    let now = now_utc();
    let id = generate_id(conn, PREFIX_PART_TRANSACTION).await?;
    conn.execute(
        "INSERT INTO part_transactions
             (id, part_id, kind, previous_quantity, new_quantity, quantity_change, reference_id, notes, performed_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        libsql::params![
            id.as_str(),
            part_id,
            adjustment.kind.as_str(),
            previous_quantity,
            adjustment.new_quantity,
            adjustment.quantity_change,
            adjustment.reference_id.as_str(),
            adjustment.notes.as_deref(),
            actor,
            format_datetime(now)
        ],
    )
    .await?;
    tracing::debug!(transaction_id = %id, part_id, kind = %adjustment.kind, "part ledger row appended");

    Ok(PartTransaction {
        id,
        part_id: part_id.to_string(),
        kind: adjustment.kind,
        previous_quantity,
        new_quantity: adjustment.new_quantity,
        quantity_change: adjustment.quantity_change,
        reference_id: adjustment.reference_id.clone(),
        notes: adjustment.notes.clone(),
        performed_by: actor.to_string(),
        created_at: now,
    })
}

async fn insert_part(
    conn: &libsql::Connection,
    actor: &str,
    new: &NewPart,
) -> Result<Part, DatabaseError> {
    let now = now_utc();
    let id = generate_id(conn, PREFIX_PART).await?;
    conn.execute(
        &format!("INSERT INTO parts ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
        libsql::params![
            id.as_str(),
            new.sku.trim(),
            new.name.trim(),
            new.quantity,
            actor,
            actor,
            format_datetime(now),
            format_datetime(now)
        ],
    )
    .await?;

    if new.quantity > 0 {
        let opening = PartAdjustment {
            kind: PartMovement::Purchase,
            new_quantity: new.quantity,
            quantity_change: new.quantity,
            reference_id: id.clone(),
            notes: Some("Opening stock".into()),
        };
        append_part_transaction(conn, &id, 0, &opening, actor).await?;
    }

    Ok(Part {
        id,
        sku: new.sku.trim().to_string(),
        name: new.name.trim().to_string(),
        quantity: new.quantity,
        created_by: actor.to_string(),
        updated_by: actor.to_string(),
        created_at: now,
        updated_at: now,
    })
}

async fn apply_adjustment(
    conn: &libsql::Connection,
    actor: &str,
    part_id: &str,
    adjustment: &PartAdjustment,
) -> Result<(Part, PartTransaction), DatabaseError> {
    let before = load_part(conn, part_id).await?;
    let row = append_part_transaction(conn, part_id, before.quantity, adjustment, actor).await?;

    let now = now_utc();
    conn.execute(
        "UPDATE parts SET quantity = ?1, updated_by = ?2, updated_at = ?3 WHERE id = ?4",
        libsql::params![adjustment.new_quantity, actor, format_datetime(now), part_id],
    )
    .await?;

    let part = Part {
        quantity: adjustment.new_quantity,
        updated_by: actor.to_string(),
        updated_at: now,
        ..before
    };
    Ok((part, row))
}

impl InventoryService {
    /// Create a part. A positive opening quantity is recorded as a `purchase`
    /// ledger row from zero.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for blank fields or a negative
    /// quantity, or a libSQL error for a duplicate SKU or unknown actor.
    pub async fn create_part(&self, actor: &str, new: NewPart) -> Result<Part, DatabaseError> {
        new.validate()?;
        require_text("actor", actor)?;

        let tx = self.begin().await?;
        let result = insert_part(&tx, actor, &new).await;
        finish(tx, result).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the part does not exist.
    pub async fn get_part(&self, id: &str) -> Result<Part, DatabaseError> {
        load_part(self.db().conn(), id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_part_by_sku(&self, sku: &str) -> Result<Option<Part>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM parts WHERE sku = ?1"),
                [sku.trim()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_part(&row)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_parts(&self, limit: u32) -> Result<Vec<Part>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM parts ORDER BY sku LIMIT {limit}"),
                (),
            )
            .await?;
        let mut parts = Vec::new();
        while let Some(row) = rows.next().await? {
            parts.push(row_to_part(&row)?);
        }
        Ok(parts)
    }

    /// Move a part to a new quantity and append the matching ledger row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the new quantity is negative, the
    /// recorded change does not equal the actual difference, or the reference
    /// is blank. The part and its ledger are untouched on any error.
    pub async fn adjust_part_quantity(
        &self,
        actor: &str,
        part_id: &str,
        adjustment: PartAdjustment,
    ) -> Result<(Part, PartTransaction), DatabaseError> {
        let tx = self.begin().await?;
        let result = apply_adjustment(&tx, actor, part_id, &adjustment).await;
        finish(tx, result).await
    }

    /// Ledger rows for one part, newest first, with the acting user's name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn part_history(
        &self,
        part_id: &str,
        limit: u32,
    ) -> Result<Vec<PartHistoryEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT t.id, t.part_id, t.kind, t.previous_quantity, t.new_quantity,
                            t.quantity_change, t.reference_id, t.notes, t.performed_by,
                            t.created_at, u.display_name
                     FROM part_transactions t
                     JOIN users u ON u.id = t.performed_by
                     WHERE t.part_id = ?1
                     ORDER BY t.created_at DESC, t.rowid DESC
                     LIMIT {limit}"
                ),
                [part_id],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(PartHistoryEntry {
                transaction: PartTransaction {
                    id: row.get::<String>(0)?,
                    part_id: row.get::<String>(1)?,
                    kind: parse_enum(&row.get::<String>(2)?)?,
                    previous_quantity: row.get::<i64>(3)?,
                    new_quantity: row.get::<i64>(4)?,
                    quantity_change: row.get::<i64>(5)?,
                    reference_id: row.get::<String>(6)?,
                    notes: get_opt_string(&row, 7)?,
                    performed_by: row.get::<String>(8)?,
                    created_at: parse_datetime(&row.get::<String>(9)?)?,
                },
                performed_by_name: row.get::<String>(10)?,
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{test_service, test_user};

    fn usage(new_quantity: i64, quantity_change: i64) -> PartAdjustment {
        PartAdjustment {
            kind: PartMovement::Usage,
            new_quantity,
            quantity_change,
            reference_id: "job-42".into(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_part_records_opening_stock() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let part = svc
            .create_part(&actor, NewPart::new("SCR-IP13", "iPhone 13 screen", 10))
            .await
            .unwrap();

        assert!(part.id.starts_with("prt-"));
        assert_eq!(svc.get_part(&part.id).await.unwrap(), part);

        let history = svc.part_history(&part.id, 10).await.unwrap();
        assert_eq!(history.len(), 1);
        let row = &history[0].transaction;
        assert_eq!(row.kind, PartMovement::Purchase);
        assert_eq!((row.previous_quantity, row.new_quantity, row.quantity_change), (0, 10, 10));
        assert_eq!(history[0].performed_by_name, "Test Operator");
    }

    #[tokio::test]
    async fn empty_part_has_no_ledger_rows() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let part = svc
            .create_part(&actor, NewPart::new("BAT-01", "Battery", 0))
            .await
            .unwrap();
        assert!(svc.part_history(&part.id, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn adjust_part_quantity_appends_row() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let part = svc
            .create_part(&actor, NewPart::new("SCR-IP13", "Screen", 10))
            .await
            .unwrap();

        let (updated, row) = svc
            .adjust_part_quantity(&actor, &part.id, usage(7, 3))
            .await
            .unwrap();
        assert_eq!(updated.quantity, 7);
        assert_eq!(row.previous_quantity, 10);
        assert_eq!(row.quantity_change, 3);
        assert_eq!(svc.get_part(&part.id).await.unwrap().quantity, 7);

        let history = svc.part_history(&part.id, 10).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].transaction.id, row.id);
    }

    #[tokio::test]
    async fn mismatched_change_leaves_part_untouched() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let part = svc
            .create_part(&actor, NewPart::new("SCR-IP13", "Screen", 10))
            .await
            .unwrap();

        let result = svc.adjust_part_quantity(&actor, &part.id, usage(7, 2)).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
        assert_eq!(svc.get_part(&part.id).await.unwrap().quantity, 10);
        assert_eq!(svc.part_history(&part.id, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn negative_quantity_rejected() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let part = svc
            .create_part(&actor, NewPart::new("CBL-1", "Cable", 2))
            .await
            .unwrap();

        let result = svc.adjust_part_quantity(&actor, &part.id, usage(-1, 3)).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
        assert!(matches!(
            svc.create_part(&actor, NewPart::new("CBL-2", "Cable", -5)).await,
            Err(DatabaseError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn blank_reference_rejected() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let part = svc
            .create_part(&actor, NewPart::new("CBL-1", "Cable", 2))
            .await
            .unwrap();
        let mut adjustment = usage(1, 1);
        adjustment.reference_id = " ".into();

        let result = svc.adjust_part_quantity(&actor, &part.id, adjustment).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
        assert_eq!(svc.get_part(&part.id).await.unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn sku_lookup() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let part = svc
            .create_part(&actor, NewPart::new("CBL-1", "Cable", 2))
            .await
            .unwrap();

        let found = svc.find_part_by_sku("CBL-1").await.unwrap();
        assert_eq!(found.map(|p| p.id), Some(part.id));
        assert!(svc.find_part_by_sku("NOPE").await.unwrap().is_none());
        assert_eq!(svc.list_parts(10).await.unwrap().len(), 1);
    }
}
