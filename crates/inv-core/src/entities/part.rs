use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PartMovement;

/// A quantity-tracked part or accessory (screens, chargers, cases).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Part {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An immutable quantity ledger row.
///
/// `quantity_change` is the magnitude of the movement and always equals
/// `|new_quantity - previous_quantity|`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PartTransaction {
    pub id: String,
    pub part_id: String,
    pub kind: PartMovement,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub quantity_change: i64,
    pub reference_id: String,
    pub notes: Option<String>,
    pub performed_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PartHistoryEntry {
    #[serde(flatten)]
    pub transaction: PartTransaction,
    pub performed_by_name: String,
}
