//! Inventory workflows: goods-in, sale, QC, repair, and returns.
//!
//! Each workflow is a fixed `DeviceUpdate` applied through the same update
//! path as [`InventoryService::update_device`], so the ledger classifies the
//! change exactly as it would a manual edit.

use inv_core::entities::Device;
use inv_core::enums::{DeviceStatus, QcResult};

use crate::error::DatabaseError;
use crate::repos::order::{OrderKind, ensure_order_open};
use crate::service::{InventoryService, finish};
use crate::updates::device::{DeviceUpdate, DeviceUpdateBuilder, NewDevice};

impl InventoryService {
    /// Book a device into stock against an open purchase order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown order,
    /// `DatabaseError::InvalidState` if the order is completed, plus any error
    /// from [`InventoryService::create_device`].
    pub async fn receive_device(
        &self,
        actor: &str,
        purchase_order_id: &str,
        new: NewDevice,
    ) -> Result<Device, DatabaseError> {
        let tx = self.begin().await?;
        let result = self.receive_on(&tx, actor, purchase_order_id, &new).await;
        finish(tx, result).await
    }

    /// Mark a device sold on an open sales order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown order or device, or
    /// `DatabaseError::InvalidState` if the order is completed.
    pub async fn sell_device(
        &self,
        actor: &str,
        sales_order_id: &str,
        device_id: &str,
    ) -> Result<Device, DatabaseError> {
        let update = DeviceUpdateBuilder::new()
            .status(DeviceStatus::Sold)
            .sales_order_id(Some(sales_order_id.to_string()))
            .build();

        let tx = self.begin().await?;
        let result = self.sell_on(&tx, actor, sales_order_id, device_id, &update).await;
        finish(tx, result).await
    }

    /// Record a QC verdict. A pass returns the device to stock; a fail parks
    /// it in `qc_failed`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown device.
    pub async fn record_qc(
        &self,
        actor: &str,
        device_id: &str,
        result: QcResult,
        comments: Option<&str>,
    ) -> Result<Device, DatabaseError> {
        let update = DeviceUpdateBuilder::new()
            .status(result.resulting_status())
            .qc_status(Some(result))
            .qc_comments(comments.map(String::from))
            .build();
        self.apply_workflow(actor, device_id, &update, None).await
    }

    /// Send a device back to QC. Any previous verdict is cleared so the next
    /// QC round is recorded even if it reaches the same result.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown device.
    pub async fn require_qc(&self, actor: &str, device_id: &str) -> Result<Device, DatabaseError> {
        let update = DeviceUpdateBuilder::new()
            .status(DeviceStatus::QcRequired)
            .qc_status(None)
            .qc_comments(None)
            .build();
        self.apply_workflow(actor, device_id, &update, None).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown device.
    pub async fn start_repair(&self, actor: &str, device_id: &str) -> Result<Device, DatabaseError> {
        let update = DeviceUpdateBuilder::new()
            .status(DeviceStatus::Repair)
            .repair_completed(false)
            .build();
        self.apply_workflow(actor, device_id, &update, None).await
    }

    /// Finish a repair. The device goes to `qc_required` with its old verdict
    /// cleared.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown device.
    pub async fn complete_repair(
        &self,
        actor: &str,
        device_id: &str,
    ) -> Result<Device, DatabaseError> {
        let update = DeviceUpdateBuilder::new()
            .status(DeviceStatus::QcRequired)
            .qc_status(None)
            .qc_comments(None)
            .repair_completed(true)
            .build();
        self.apply_workflow(actor, device_id, &update, None).await
    }

    /// Take a device back from a customer. `notes` replaces the generated
    /// note on the `return_in` ledger row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown device.
    pub async fn return_device(
        &self,
        actor: &str,
        device_id: &str,
        notes: Option<&str>,
    ) -> Result<Device, DatabaseError> {
        let update = DeviceUpdateBuilder::new()
            .status(DeviceStatus::Returned)
            .build();
        self.apply_workflow(actor, device_id, &update, notes).await
    }

    async fn receive_on(
        &self,
        conn: &libsql::Connection,
        actor: &str,
        purchase_order_id: &str,
        new: &NewDevice,
    ) -> Result<Device, DatabaseError> {
        ensure_order_open(conn, OrderKind::Purchase, purchase_order_id).await?;
        self.insert_device(conn, actor, new, Some(purchase_order_id))
            .await
    }

    async fn sell_on(
        &self,
        conn: &libsql::Connection,
        actor: &str,
        sales_order_id: &str,
        device_id: &str,
        update: &DeviceUpdate,
    ) -> Result<Device, DatabaseError> {
        ensure_order_open(conn, OrderKind::Sales, sales_order_id).await?;
        self.update_device_on(conn, actor, device_id, update, None)
            .await
    }

    async fn apply_workflow(
        &self,
        actor: &str,
        device_id: &str,
        update: &DeviceUpdate,
        status_note: Option<&str>,
    ) -> Result<Device, DatabaseError> {
        let tx = self.begin().await?;
        let result = self
            .update_device_on(&tx, actor, device_id, update, status_note)
            .await;
        finish(tx, result).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use inv_core::entities::DeviceHistoryEntry;
    use inv_core::enums::TransactionKind;

    use super::*;
    use crate::test_support::helpers::{new_phone, stocked_phone, test_service, test_user};

    async fn history(svc: &InventoryService, device_id: &str) -> Vec<DeviceHistoryEntry> {
        svc.device_history(device_id, 50).await.unwrap()
    }

    #[tokio::test]
    async fn receive_links_purchase_order() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let supplier = svc.find_or_create_supplier("Trade-in Co").await.unwrap();
        let po = svc
            .create_purchase_order(&actor, &supplier.id, "PO-1")
            .await
            .unwrap();

        let device = svc
            .receive_device(&actor, &po.id, new_phone("490154203237518"))
            .await
            .unwrap();
        assert_eq!(device.purchase_order_id.as_deref(), Some(po.id.as_str()));

        let rows = history(&svc, &device.id).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].transaction.kind, TransactionKind::Purchase);
        assert_eq!(rows[0].transaction.reference_id, po.id);
    }

    #[tokio::test]
    async fn receive_into_completed_order_fails_without_writes() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let supplier = svc.find_or_create_supplier("Trade-in Co").await.unwrap();
        let po = svc
            .create_purchase_order(&actor, &supplier.id, "PO-2")
            .await
            .unwrap();
        svc.complete_purchase_order(&po.id).await.unwrap();

        let result = svc
            .receive_device(&actor, &po.id, new_phone("490154203237518"))
            .await;
        assert!(matches!(result, Err(DatabaseError::InvalidState(_))));
        let found = svc
            .find_device_by_identifier(&new_phone("490154203237518").identifier)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn sell_references_sales_order() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let device = stocked_phone(&svc, &actor).await;
        let customer = svc.find_or_create_customer("Jo Bloggs").await.unwrap();
        let so = svc
            .create_sales_order(&actor, &customer.id, "SO-1")
            .await
            .unwrap();

        let sold = svc.sell_device(&actor, &so.id, &device.id).await.unwrap();
        assert_eq!(sold.status, DeviceStatus::Sold);
        assert_eq!(sold.sales_order_id.as_deref(), Some(so.id.as_str()));

        let rows = history(&svc, &device.id).await;
        assert_eq!(rows.len(), 2);
        let sale = &rows[0].transaction;
        assert_eq!(sale.kind, TransactionKind::Sale);
        assert_eq!(sale.previous_status, Some(DeviceStatus::InStock));
        assert_eq!(sale.new_status, DeviceStatus::Sold);
        assert_eq!(sale.reference_id, so.id);
    }

    #[tokio::test]
    async fn qc_pass_and_fail() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let device = stocked_phone(&svc, &actor).await;

        svc.require_qc(&actor, &device.id).await.unwrap();
        let failed = svc
            .record_qc(&actor, &device.id, QcResult::Fail, Some("Dead pixel"))
            .await
            .unwrap();
        assert_eq!(failed.status, DeviceStatus::QcFailed);
        assert_eq!(failed.qc_comments.as_deref(), Some("Dead pixel"));

        svc.require_qc(&actor, &device.id).await.unwrap();
        let passed = svc
            .record_qc(&actor, &device.id, QcResult::Pass, None)
            .await
            .unwrap();
        assert_eq!(passed.status, DeviceStatus::InStock);
        assert_eq!(passed.qc_status, Some(QcResult::Pass));
        assert!(passed.qc_comments.is_none());

        let rows = history(&svc, &device.id).await;
        let qc_rows = rows
            .iter()
            .filter(|r| r.transaction.kind == TransactionKind::Qc)
            .count();
        // two require_qc status rows and two verdicts
        assert_eq!(qc_rows, 4);
        assert_eq!(rows[0].transaction.notes.as_deref(), Some("QC pass"));
    }

    #[tokio::test]
    async fn repair_round_trip() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let device = stocked_phone(&svc, &actor).await;

        let in_repair = svc.start_repair(&actor, &device.id).await.unwrap();
        assert_eq!(in_repair.status, DeviceStatus::Repair);
        assert!(!in_repair.repair_completed);

        let repaired = svc.complete_repair(&actor, &device.id).await.unwrap();
        assert_eq!(repaired.status, DeviceStatus::QcRequired);
        assert!(repaired.repair_completed);

        let rows = history(&svc, &device.id).await;
        let notes: Vec<_> = rows
            .iter()
            .map(|r| (r.transaction.kind, r.transaction.notes.clone()))
            .collect();
        assert_eq!(
            notes,
            vec![
                (TransactionKind::Repair, Some("Repair completed".to_string())),
                (TransactionKind::Qc, Some("QC pending".to_string())),
                (TransactionKind::Repair, Some("Repair in progress".to_string())),
                (TransactionKind::Transfer, None),
            ]
        );
    }

    #[tokio::test]
    async fn return_uses_caller_note() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let device = stocked_phone(&svc, &actor).await;

        let returned = svc
            .return_device(&actor, &device.id, Some("Buyer's remorse"))
            .await
            .unwrap();
        assert_eq!(returned.status, DeviceStatus::Returned);

        let rows = history(&svc, &device.id).await;
        assert_eq!(rows[0].transaction.kind, TransactionKind::ReturnIn);
        assert_eq!(rows[0].transaction.notes.as_deref(), Some("Buyer's remorse"));
    }

    #[tokio::test]
    async fn workflow_on_unknown_device() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        assert!(matches!(
            svc.start_repair(&actor, "dev-00000000").await,
            Err(DatabaseError::NoResult)
        ));
    }
}
