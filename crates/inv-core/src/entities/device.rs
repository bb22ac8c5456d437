use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DeviceStatus, Grade, QcResult};

/// How a physical unit is identified. A device carries exactly one of these.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DeviceIdentifier {
    /// 15-digit IMEI of a cellular device.
    Imei(String),
    /// Manufacturer serial number of a non-cellular device.
    Serial(String),
}

impl DeviceIdentifier {
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Imei(v) | Self::Serial(v) => v,
        }
    }

    #[must_use]
    pub fn imei(&self) -> Option<&str> {
        match self {
            Self::Imei(v) => Some(v),
            Self::Serial(_) => None,
        }
    }

    #[must_use]
    pub fn serial(&self) -> Option<&str> {
        match self {
            Self::Serial(v) => Some(v),
            Self::Imei(_) => None,
        }
    }

    /// Rebuild from the two nullable storage columns.
    ///
    /// Returns `None` unless exactly one column is populated.
    #[must_use]
    pub fn from_columns(imei: Option<String>, serial: Option<String>) -> Option<Self> {
        match (imei, serial) {
            (Some(imei), None) => Some(Self::Imei(imei)),
            (None, Some(serial)) => Some(Self::Serial(serial)),
            _ => None,
        }
    }
}

/// A tracked unit of stock: a phone, tablet, or other serialised device.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Device {
    pub id: String,
    pub identifier: DeviceIdentifier,
    pub manufacturer: String,
    pub model: String,
    pub color: Option<String>,
    pub storage: Option<String>,
    pub grade: Option<Grade>,
    pub status: DeviceStatus,
    pub qc_status: Option<QcResult>,
    pub qc_comments: Option<String>,
    pub repair_completed: bool,
    pub purchase_order_id: Option<String>,
    pub sales_order_id: Option<String>,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
