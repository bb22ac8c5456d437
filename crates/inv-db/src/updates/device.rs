//! Device input and update builder.

use serde::Serialize;

use inv_core::entities::DeviceIdentifier;
use inv_core::enums::{DeviceStatus, Grade, QcResult};
use inv_core::errors::CoreError;
use inv_core::imei::validate_imei;

/// A device about to be booked into inventory.
#[derive(Debug, Clone, Serialize)]
pub struct NewDevice {
    pub identifier: DeviceIdentifier,
    pub manufacturer: String,
    pub model: String,
    pub color: Option<String>,
    pub storage: Option<String>,
    pub grade: Option<Grade>,
    pub status: DeviceStatus,
}

impl NewDevice {
    /// Start a new device in `in_stock` with no optional attributes.
    pub fn new(
        identifier: DeviceIdentifier,
        manufacturer: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            identifier,
            manufacturer: manufacturer.into(),
            model: model.into(),
            color: None,
            storage: None,
            grade: None,
            status: DeviceStatus::InStock,
        }
    }

    #[must_use]
    pub fn color(mut self, val: impl Into<String>) -> Self {
        self.color = Some(val.into());
        self
    }

    #[must_use]
    pub fn storage(mut self, val: impl Into<String>) -> Self {
        self.storage = Some(val.into());
        self
    }

    #[must_use]
    pub const fn grade(mut self, val: Grade) -> Self {
        self.grade = Some(val);
        self
    }

    #[must_use]
    pub const fn status(mut self, val: DeviceStatus) -> Self {
        self.status = val;
        self
    }

    /// Check the identifier and descriptive fields.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a malformed IMEI or blank serial
    /// number, and `CoreError::MissingField` for a blank manufacturer or model.
    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.identifier {
            DeviceIdentifier::Imei(imei) => validate_imei(imei)?,
            DeviceIdentifier::Serial(serial) => {
                if serial.trim().is_empty() {
                    return Err(CoreError::Validation(
                        "serial number cannot be blank".into(),
                    ));
                }
            }
        }
        if self.manufacturer.trim().is_empty() {
            return Err(CoreError::MissingField("manufacturer"));
        }
        if self.model.trim().is_empty() {
            return Err(CoreError::MissingField("model"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<Option<Grade>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeviceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qc_status: Option<Option<QcResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qc_comments: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_order_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_order_id: Option<Option<String>>,
}

impl DeviceUpdate {
    /// True when no field would be written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.manufacturer.is_none()
            && self.model.is_none()
            && self.color.is_none()
            && self.storage.is_none()
            && self.grade.is_none()
            && self.status.is_none()
            && self.qc_status.is_none()
            && self.qc_comments.is_none()
            && self.repair_completed.is_none()
            && self.purchase_order_id.is_none()
            && self.sales_order_id.is_none()
    }

    /// Reject blank replacements for required text columns.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingField` naming the blank field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.manufacturer.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(CoreError::MissingField("manufacturer"));
        }
        if self.model.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(CoreError::MissingField("model"));
        }
        Ok(())
    }
}

pub struct DeviceUpdateBuilder(DeviceUpdate);

impl DeviceUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(DeviceUpdate::default())
    }

    #[must_use]
    pub fn manufacturer(mut self, val: impl Into<String>) -> Self {
        self.0.manufacturer = Some(val.into());
        self
    }

    #[must_use]
    pub fn model(mut self, val: impl Into<String>) -> Self {
        self.0.model = Some(val.into());
        self
    }

    #[must_use]
    pub fn color(mut self, val: Option<String>) -> Self {
        self.0.color = Some(val);
        self
    }

    #[must_use]
    pub fn storage(mut self, val: Option<String>) -> Self {
        self.0.storage = Some(val);
        self
    }

    #[must_use]
    pub fn grade(mut self, val: Option<Grade>) -> Self {
        self.0.grade = Some(val);
        self
    }

    #[must_use]
    pub fn status(mut self, val: DeviceStatus) -> Self {
        self.0.status = Some(val);
        self
    }

    #[must_use]
    pub fn qc_status(mut self, val: Option<QcResult>) -> Self {
        self.0.qc_status = Some(val);
        self
    }

    #[must_use]
    pub fn qc_comments(mut self, val: Option<String>) -> Self {
        self.0.qc_comments = Some(val);
        self
    }

    #[must_use]
    pub fn repair_completed(mut self, val: bool) -> Self {
        self.0.repair_completed = Some(val);
        self
    }

    #[must_use]
    pub fn purchase_order_id(mut self, val: Option<String>) -> Self {
        self.0.purchase_order_id = Some(val);
        self
    }

    #[must_use]
    pub fn sales_order_id(mut self, val: Option<String>) -> Self {
        self.0.sales_order_id = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> DeviceUpdate {
        self.0
    }
}

impl Default for DeviceUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_is_empty() {
        assert!(DeviceUpdateBuilder::new().build().is_empty());
        assert!(!DeviceUpdateBuilder::new().repair_completed(false).build().is_empty());
    }

    #[test]
    fn clearing_a_column_is_not_empty() {
        let update = DeviceUpdateBuilder::new().color(None).build();
        assert!(!update.is_empty());
        assert_eq!(update.color, Some(None));
    }

    #[test]
    fn serializes_only_changed_fields() {
        let update = DeviceUpdateBuilder::new()
            .status(DeviceStatus::Sold)
            .grade(None)
            .build();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"grade": null, "status": "sold"}));
    }

    #[test]
    fn new_device_rejects_bad_identifiers() {
        let bad_imei = NewDevice::new(DeviceIdentifier::Imei("356789012345678".into()), "Apple", "iPhone");
        assert!(matches!(bad_imei.validate(), Err(CoreError::Validation(_))));

        let blank_serial = NewDevice::new(DeviceIdentifier::Serial("  ".into()), "Apple", "iPad");
        assert!(matches!(blank_serial.validate(), Err(CoreError::Validation(_))));

        let ok = NewDevice::new(DeviceIdentifier::Serial("F9FXK2ABC".into()), "Apple", "iPad")
            .grade(Grade::B);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn new_device_requires_model() {
        let device = NewDevice::new(DeviceIdentifier::Serial("SN-1".into()), "Samsung", " ");
        assert!(matches!(device.validate(), Err(CoreError::MissingField("model"))));
    }

    #[test]
    fn update_rejects_blank_manufacturer() {
        let update = DeviceUpdateBuilder::new().manufacturer("").build();
        assert!(matches!(
            update.validate(),
            Err(CoreError::MissingField("manufacturer"))
        ));
    }
}
