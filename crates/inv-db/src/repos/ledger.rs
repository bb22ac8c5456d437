//! Device status ledger persistence.
//!
//! `record_device_change` is the single write path into `device_transactions`.
//! It runs on the caller's connection so the ledger rows land in the same
//! transaction as the device write that produced them.

use inv_core::entities::{Device, DeviceHistoryEntry, DeviceTransaction};
use inv_core::enums::DeviceStatus;
use inv_core::ids::PREFIX_DEVICE_TRANSACTION;
use inv_core::ledger::derive_device_transactions;

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, generate_id, get_opt_string, now_utc, parse_datetime, parse_enum,
    parse_optional_enum,
};
use crate::service::InventoryService;

fn row_to_history_entry(row: &libsql::Row) -> Result<DeviceHistoryEntry, DatabaseError> {
    Ok(DeviceHistoryEntry {
        transaction: DeviceTransaction {
            id: row.get::<String>(0)?,
            device_id: row.get::<String>(1)?,
            previous_status: parse_optional_enum::<DeviceStatus>(get_opt_string(row, 2)?.as_deref())?,
            new_status: parse_enum(&row.get::<String>(3)?)?,
            kind: parse_enum(&row.get::<String>(4)?)?,
            reference_id: row.get::<String>(5)?,
            notes: get_opt_string(row, 6)?,
            performed_by: row.get::<String>(7)?,
            created_at: parse_datetime(&row.get::<String>(8)?)?,
        },
        performed_by_name: row.get::<String>(9)?,
    })
}

impl InventoryService {
    /// Derive and append the ledger rows for one device write.
    ///
    /// `old` is `None` for a newly inserted device. Returns the appended rows
    /// in write order (status, then QC, then repair).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if any derived row lacks a device,
    /// reference, or acting user (nothing is appended in that case), or a
    /// libSQL error if an insert is rejected.
    pub async fn record_device_change(
        &self,
        conn: &libsql::Connection,
        old: Option<&Device>,
        new: &Device,
    ) -> Result<Vec<DeviceTransaction>, DatabaseError> {
        self.record_device_change_noted(conn, old, new, None).await
    }

    pub(crate) async fn record_device_change_noted(
        &self,
        conn: &libsql::Connection,
        old: Option<&Device>,
        new: &Device,
        status_note: Option<&str>,
    ) -> Result<Vec<DeviceTransaction>, DatabaseError> {
        let mut drafts = derive_device_transactions(old, new);
        for draft in &drafts {
            draft.validate()?;
        }

        if let Some(note) = status_note.map(str::trim).filter(|n| !n.is_empty()) {
            if let Some(draft) = drafts
                .iter_mut()
                .find(|d| d.previous_status != Some(d.new_status))
            {
                draft.notes = Some(note.to_string());
            }
        }

        let now = now_utc();
        let mut written = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = generate_id(conn, PREFIX_DEVICE_TRANSACTION).await?;
            conn.execute(
                "INSERT INTO device_transactions
                     (id, device_id, previous_status, new_status, kind, reference_id, notes, performed_by, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                libsql::params![
                    id.as_str(),
                    draft.device_id.as_str(),
                    draft.previous_status.map(DeviceStatus::as_str),
                    draft.new_status.as_str(),
                    draft.kind.as_str(),
                    draft.reference_id.as_str(),
                    draft.notes.as_deref(),
                    draft.performed_by.as_str(),
                    format_datetime(now)
                ],
            )
            .await?;
            tracing::debug!(
                transaction_id = %id,
                device_id = %draft.device_id,
                kind = %draft.kind,
                "ledger row appended"
            );
            written.push(draft.into_transaction(id, now));
        }
        Ok(written)
    }

    /// Ledger rows for one device, newest first, with the acting user's name.
    ///
    /// Rows written in the same instant come back in reverse insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn device_history(
        &self,
        device_id: &str,
        limit: u32,
    ) -> Result<Vec<DeviceHistoryEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT t.id, t.device_id, t.previous_status, t.new_status, t.kind,
                            t.reference_id, t.notes, t.performed_by, t.created_at, u.display_name
                     FROM device_transactions t
                     JOIN users u ON u.id = t.performed_by
                     WHERE t.device_id = ?1
                     ORDER BY t.created_at DESC, t.rowid DESC
                     LIMIT {limit}"
                ),
                [device_id],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_history_entry(&row)?);
        }
        Ok(entries)
    }
}
