//! Shared test utilities for inv-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use inv_core::entities::{Device, DeviceIdentifier};

    use crate::InventoryDb;
    use crate::service::InventoryService;
    use crate::updates::device::NewDevice;

    /// Create an in-memory `InventoryService`.
    pub async fn test_service() -> InventoryService {
        let db = InventoryDb::open_local(":memory:").await.unwrap();
        InventoryService::from_db(db)
    }

    /// Register an acting user and return its ID.
    pub async fn test_user(svc: &InventoryService) -> String {
        svc.create_user("Test Operator", None).await.unwrap().id
    }

    /// A valid IMEI-identified handset.
    pub fn new_phone(imei: &str) -> NewDevice {
        NewDevice::new(
            DeviceIdentifier::Imei(imei.to_string()),
            "Apple",
            "iPhone 13",
        )
    }

    /// Book a phone straight into stock (no purchase order).
    pub async fn stocked_phone(svc: &InventoryService, actor: &str) -> Device {
        svc.create_device(actor, new_phone("490154203237518"))
            .await
            .unwrap()
    }
}
