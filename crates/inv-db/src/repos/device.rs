//! Device repository: booking, lookup, listing, and field updates.
//!
//! Every write goes through one libSQL transaction that also appends the
//! device's ledger rows (see [`super::ledger`]).

use inv_core::entities::{Device, DeviceIdentifier};
use inv_core::enums::{DeviceStatus, Grade, QcResult};
use inv_core::ids::PREFIX_DEVICE;

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, generate_id, get_opt_string, now_utc, parse_datetime, parse_enum,
    parse_optional_enum, require_text,
};
use crate::service::{InventoryService, finish};
use crate::updates::device::{DeviceUpdate, NewDevice};

pub(crate) const SELECT_COLS: &str = "id, imei, serial_number, manufacturer, model, color, \
     storage, grade, status, qc_status, qc_comments, repair_completed, purchase_order_id, \
     sales_order_id, created_by, updated_by, created_at, updated_at";

fn row_to_device(row: &libsql::Row) -> Result<Device, DatabaseError> {
    let id = row.get::<String>(0)?;
    let identifier = DeviceIdentifier::from_columns(get_opt_string(row, 1)?, get_opt_string(row, 2)?)
        .ok_or_else(|| {
            DatabaseError::InvalidState(format!("device {id} must have exactly one identifier"))
        })?;
    Ok(Device {
        id,
        identifier,
        manufacturer: row.get::<String>(3)?,
        model: row.get::<String>(4)?,
        color: get_opt_string(row, 5)?,
        storage: get_opt_string(row, 6)?,
        grade: parse_optional_enum(get_opt_string(row, 7)?.as_deref())?,
        status: parse_enum(&row.get::<String>(8)?)?,
        qc_status: parse_optional_enum(get_opt_string(row, 9)?.as_deref())?,
        qc_comments: get_opt_string(row, 10)?,
        repair_completed: row.get::<i64>(11)? != 0,
        purchase_order_id: get_opt_string(row, 12)?,
        sales_order_id: get_opt_string(row, 13)?,
        created_by: row.get::<String>(14)?,
        updated_by: row.get::<String>(15)?,
        created_at: parse_datetime(&row.get::<String>(16)?)?,
        updated_at: parse_datetime(&row.get::<String>(17)?)?,
    })
}

/// Load a device through `conn`, which may be an open transaction.
pub(crate) async fn load_device(
    conn: &libsql::Connection,
    id: &str,
) -> Result<Device, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM devices WHERE id = ?1"), [id])
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    row_to_device(&row)
}

/// Filters for [`InventoryService::list_devices`].
#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    pub status: Option<DeviceStatus>,
    pub limit: Option<u32>,
}

fn push_set(sets: &mut Vec<String>, params: &mut Vec<libsql::Value>, column: &str, value: libsql::Value) {
    params.push(value);
    sets.push(format!("{column} = ?{}", params.len()));
}

impl InventoryService {
    /// Book a device into inventory without a purchase order.
    ///
    /// The ledger records the creation as a `transfer`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a bad identifier or blank
    /// field, or a libSQL error for a duplicate identifier or unknown actor.
    pub async fn create_device(&self, actor: &str, new: NewDevice) -> Result<Device, DatabaseError> {
        let tx = self.begin().await?;
        let result = self.insert_device(&tx, actor, &new, None).await;
        finish(tx, result).await
    }

    /// Insert a device row and its creation ledger row through `conn`.
    pub(crate) async fn insert_device(
        &self,
        conn: &libsql::Connection,
        actor: &str,
        new: &NewDevice,
        purchase_order_id: Option<&str>,
    ) -> Result<Device, DatabaseError> {
        new.validate()?;
        require_text("actor", actor)?;

        let now = now_utc();
        let id = generate_id(conn, PREFIX_DEVICE).await?;
        conn.execute(
            "INSERT INTO devices (id, imei, serial_number, manufacturer, model, color, storage, grade,
                 status, repair_completed, purchase_order_id, created_by, updated_by, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10, ?11, ?12, ?13, ?14)",
            libsql::params![
                id.as_str(),
                new.identifier.imei(),
                new.identifier.serial(),
                new.manufacturer.trim(),
                new.model.trim(),
                new.color.as_deref(),
                new.storage.as_deref(),
                new.grade.map(Grade::as_str),
                new.status.as_str(),
                purchase_order_id,
                actor,
                actor,
                format_datetime(now),
                format_datetime(now)
            ],
        )
        .await?;

        let device = Device {
            id,
            identifier: new.identifier.clone(),
            manufacturer: new.manufacturer.trim().to_string(),
            model: new.model.trim().to_string(),
            color: new.color.clone(),
            storage: new.storage.clone(),
            grade: new.grade,
            status: new.status,
            qc_status: None,
            qc_comments: None,
            repair_completed: false,
            purchase_order_id: purchase_order_id.map(String::from),
            sales_order_id: None,
            created_by: actor.to_string(),
            updated_by: actor.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.record_device_change(conn, None, &device).await?;
        tracing::debug!(device_id = %device.id, status = %device.status, "device booked");
        Ok(device)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the device does not exist.
    pub async fn get_device(&self, id: &str) -> Result<Device, DatabaseError> {
        load_device(self.db().conn(), id).await
    }

    /// Look a device up by its IMEI or serial number.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_device_by_identifier(
        &self,
        identifier: &DeviceIdentifier,
    ) -> Result<Option<Device>, DatabaseError> {
        let column = match identifier {
            DeviceIdentifier::Imei(_) => "imei",
            DeviceIdentifier::Serial(_) => "serial_number",
        };
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM devices WHERE {column} = ?1"),
                [identifier.value()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_device(&row)?)),
            None => Ok(None),
        }
    }

    /// List devices, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_devices(&self, filter: &DeviceFilter) -> Result<Vec<Device>, DatabaseError> {
        let mut params: Vec<libsql::Value> = Vec::new();
        let where_clause = match filter.status {
            Some(status) => {
                params.push(libsql::Value::Text(status.as_str().to_string()));
                "WHERE status = ?1"
            }
            None => "",
        };
        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM devices {where_clause}
             ORDER BY updated_at DESC, rowid DESC LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut devices = Vec::new();
        while let Some(row) = rows.next().await? {
            devices.push(row_to_device(&row)?);
        }
        Ok(devices)
    }

    /// Apply a partial update and append the ledger rows it implies.
    ///
    /// An empty update returns the device unchanged and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown device,
    /// `DatabaseError::Validation` for blank required fields, or a libSQL
    /// error if any write (device or ledger) is rejected. Nothing is written
    /// on error.
    pub async fn update_device(
        &self,
        actor: &str,
        device_id: &str,
        update: DeviceUpdate,
    ) -> Result<Device, DatabaseError> {
        let tx = self.begin().await?;
        let result = self
            .update_device_on(&tx, actor, device_id, &update, None)
            .await;
        finish(tx, result).await
    }

    /// Update through `conn`. `status_note` replaces the synthesized note of
    /// the status-change ledger row, if one is produced.
    pub(crate) async fn update_device_on(
        &self,
        conn: &libsql::Connection,
        actor: &str,
        device_id: &str,
        update: &DeviceUpdate,
        status_note: Option<&str>,
    ) -> Result<Device, DatabaseError> {
        update.validate()?;
        require_text("actor", actor)?;
        let old = load_device(conn, device_id).await?;
        if update.is_empty() {
            return Ok(old);
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref manufacturer) = update.manufacturer {
            push_set(&mut sets, &mut params, "manufacturer", manufacturer.trim().into());
        }
        if let Some(ref model) = update.model {
            push_set(&mut sets, &mut params, "model", model.trim().into());
        }
        if let Some(ref color) = update.color {
            push_set(&mut sets, &mut params, "color", color.as_deref().into());
        }
        if let Some(ref storage) = update.storage {
            push_set(&mut sets, &mut params, "storage", storage.as_deref().into());
        }
        if let Some(grade) = update.grade {
            push_set(&mut sets, &mut params, "grade", grade.map(Grade::as_str).into());
        }
        if let Some(status) = update.status {
            push_set(&mut sets, &mut params, "status", status.as_str().into());
        }
        if let Some(qc_status) = update.qc_status {
            push_set(
                &mut sets,
                &mut params,
                "qc_status",
                qc_status.map(QcResult::as_str).into(),
            );
        }
        if let Some(ref qc_comments) = update.qc_comments {
            push_set(&mut sets, &mut params, "qc_comments", qc_comments.as_deref().into());
        }
        if let Some(repair_completed) = update.repair_completed {
            push_set(
                &mut sets,
                &mut params,
                "repair_completed",
                i64::from(repair_completed).into(),
            );
        }
        if let Some(ref po) = update.purchase_order_id {
            push_set(&mut sets, &mut params, "purchase_order_id", po.as_deref().into());
        }
        if let Some(ref so) = update.sales_order_id {
            push_set(&mut sets, &mut params, "sales_order_id", so.as_deref().into());
        }

        push_set(&mut sets, &mut params, "updated_by", actor.into());
        push_set(&mut sets, &mut params, "updated_at", format_datetime(now_utc()).into());

        params.push(device_id.into());
        let sql = format!(
            "UPDATE devices SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );
        conn.execute(&sql, libsql::params_from_iter(params)).await?;

        let new = load_device(conn, device_id).await?;
        let rows = self
            .record_device_change_noted(conn, Some(&old), &new, status_note)
            .await?;
        tracing::debug!(device_id, ledger_rows = rows.len(), "device updated");
        Ok(new)
    }
}
