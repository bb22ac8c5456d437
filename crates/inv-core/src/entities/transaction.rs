use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DeviceStatus, TransactionKind};

/// An immutable device ledger row recording a status-relevant change.
///
/// `previous_status` is `None` only for the row written when the device is created.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeviceTransaction {
    pub id: String,
    pub device_id: String,
    pub previous_status: Option<DeviceStatus>,
    pub new_status: DeviceStatus,
    pub kind: TransactionKind,
    pub reference_id: String,
    pub notes: Option<String>,
    pub performed_by: String,
    pub created_at: DateTime<Utc>,
}

/// A ledger row joined to the acting user's display name, for history views.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeviceHistoryEntry {
    #[serde(flatten)]
    pub transaction: DeviceTransaction,
    pub performed_by_name: String,
}
