//! Ledger derivation.
//!
//! Pure functions that turn a device change (old row → new row) into the
//! audit rows that must be appended, and that check the arithmetic of part
//! quantity movements. Persistence lives in `inv-db`; nothing here touches
//! the database.
//!
//! A device update is compared across three independent field groups:
//!
//! | field group       | row kind                     | previous → new status |
//! |-------------------|------------------------------|-----------------------|
//! | `status`          | `TransactionKind::for_status`| old → new             |
//! | `qc_status`       | `qc`                         | current → current     |
//! | `repair_completed`| `repair`                     | current → current     |
//!
//! All three can fire from one update.

use chrono::{DateTime, Utc};

use crate::entities::{Device, DeviceTransaction};
use crate::enums::{DeviceStatus, QcResult, TransactionKind};
use crate::errors::CoreError;

/// A device ledger row before it has been assigned an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub device_id: String,
    pub previous_status: Option<DeviceStatus>,
    pub new_status: DeviceStatus,
    pub kind: TransactionKind,
    pub reference_id: String,
    pub notes: Option<String>,
    pub performed_by: String,
}

impl TransactionDraft {
    /// Check the identifying fields every ledger row must carry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingField` naming the first blank field.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("device_id", &self.device_id)?;
        require("reference_id", &self.reference_id)?;
        require("performed_by", &self.performed_by)?;
        Ok(())
    }

    #[must_use]
    pub fn into_transaction(self, id: String, created_at: DateTime<Utc>) -> DeviceTransaction {
        DeviceTransaction {
            id,
            device_id: self.device_id,
            previous_status: self.previous_status,
            new_status: self.new_status,
            kind: self.kind,
            reference_id: self.reference_id,
            notes: self.notes,
            performed_by: self.performed_by,
            created_at,
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::MissingField(field));
    }
    Ok(())
}

/// Derive the ledger rows for a device write.
///
/// `old` is `None` when the device is being created. The acting user is taken
/// from `new.updated_by`.
#[must_use]
pub fn derive_device_transactions(old: Option<&Device>, new: &Device) -> Vec<TransactionDraft> {
    let Some(old) = old else {
        return vec![creation_draft(new)];
    };

    let mut drafts = Vec::new();

    if old.status != new.status {
        let kind = TransactionKind::for_status(new.status);
        drafts.push(TransactionDraft {
            device_id: new.id.clone(),
            previous_status: Some(old.status),
            new_status: new.status,
            kind,
            reference_id: reference_for(kind, new),
            notes: Some(status_note(old.status, new)),
            performed_by: new.updated_by.clone(),
        });
    }

    if new.qc_status.is_some() && old.qc_status != new.qc_status {
        drafts.push(TransactionDraft {
            device_id: new.id.clone(),
            previous_status: Some(new.status),
            new_status: new.status,
            kind: TransactionKind::Qc,
            reference_id: new.id.clone(),
            notes: Some(qc_note(new.qc_status, new.qc_comments.as_deref())),
            performed_by: new.updated_by.clone(),
        });
    }

    if old.repair_completed != new.repair_completed {
        drafts.push(TransactionDraft {
            device_id: new.id.clone(),
            previous_status: Some(new.status),
            new_status: new.status,
            kind: TransactionKind::Repair,
            reference_id: new.id.clone(),
            notes: Some(repair_note(new.repair_completed, false).to_string()),
            performed_by: new.updated_by.clone(),
        });
    }

    drafts
}

fn creation_draft(device: &Device) -> TransactionDraft {
    let kind = if device.purchase_order_id.is_some() {
        TransactionKind::Purchase
    } else {
        TransactionKind::Transfer
    };
    TransactionDraft {
        device_id: device.id.clone(),
        previous_status: None,
        new_status: device.status,
        kind,
        reference_id: reference_for(kind, device),
        notes: None,
        performed_by: device.created_by.clone(),
    }
}

/// Purchases point at their purchase order and linked sales at their sales
/// order; everything else points at the device itself.
fn reference_for(kind: TransactionKind, device: &Device) -> String {
    let order = match kind {
        TransactionKind::Purchase => device.purchase_order_id.as_ref(),
        TransactionKind::Sale => device.sales_order_id.as_ref(),
        _ => None,
    };
    order.unwrap_or(&device.id).clone()
}

fn status_note(previous: DeviceStatus, device: &Device) -> String {
    match device.status {
        status if status.is_qc() => qc_note(device.qc_status, device.qc_comments.as_deref()),
        DeviceStatus::Repair => repair_note(device.repair_completed, true).to_string(),
        status => format!("Status changed from {previous} to {status}"),
    }
}

fn qc_note(result: Option<QcResult>, comments: Option<&str>) -> String {
    let verdict = result.map_or("pending", QcResult::as_str);
    match comments.map(str::trim).filter(|c| !c.is_empty()) {
        Some(comments) => format!("QC {verdict}: {comments}"),
        None => format!("QC {verdict}"),
    }
}

const fn repair_note(completed: bool, in_repair_status: bool) -> &'static str {
    match (completed, in_repair_status) {
        (true, _) => "Repair completed",
        (false, true) => "Repair in progress",
        (false, false) => "Repair started",
    }
}

/// Check a part quantity movement.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `new_quantity` is negative or the
/// recorded change does not equal `|new_quantity - previous_quantity|`.
pub fn validate_quantity_change(
    previous_quantity: i64,
    new_quantity: i64,
    quantity_change: i64,
) -> Result<(), CoreError> {
    if new_quantity < 0 {
        return Err(CoreError::Validation(format!(
            "new quantity cannot be negative: {new_quantity}"
        )));
    }
    let actual = (new_quantity - previous_quantity).abs();
    if quantity_change != actual {
        return Err(CoreError::Validation(format!(
            "recorded quantity change {quantity_change} does not match actual change {actual} \
             ({previous_quantity} -> {new_quantity})"
        )));
    }
    Ok(())
}
