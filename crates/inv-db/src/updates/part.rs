//! Part inputs.

use serde::Serialize;

use inv_core::enums::PartMovement;
use inv_core::errors::CoreError;

/// A part SKU about to be created, with its opening stock.
#[derive(Debug, Clone, Serialize)]
pub struct NewPart {
    pub sku: String,
    pub name: String,
    pub quantity: i64,
}

impl NewPart {
    pub fn new(sku: impl Into<String>, name: impl Into<String>, quantity: i64) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            quantity,
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError` for a blank SKU or name, or a negative quantity.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.sku.trim().is_empty() {
            return Err(CoreError::MissingField("sku"));
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::MissingField("name"));
        }
        if self.quantity < 0 {
            return Err(CoreError::Validation(format!(
                "initial quantity cannot be negative: {}",
                self.quantity
            )));
        }
        Ok(())
    }
}

/// A stock movement against one part.
///
/// `quantity_change` is the magnitude the caller claims moved; it must equal
/// the distance between the part's current quantity and `new_quantity`.
#[derive(Debug, Clone, Serialize)]
pub struct PartAdjustment {
    pub kind: PartMovement,
    pub new_quantity: i64,
    pub quantity_change: i64,
    pub reference_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
