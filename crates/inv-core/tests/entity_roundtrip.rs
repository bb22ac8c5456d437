//! Serde roundtrip and JsonSchema validation tests for the entity types.

use chrono::Utc;
use schemars::schema_for;
use inv_core::entities::*;
use inv_core::enums::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_transaction() -> DeviceTransaction {
    DeviceTransaction {
        id: "dtx-1a2b3c4d".into(),
        device_id: "dev-a3f8b2c1".into(),
        previous_status: Some(DeviceStatus::InStock),
        new_status: DeviceStatus::Sold,
        kind: TransactionKind::Sale,
        reference_id: "so-0c0ffee0".into(),
        notes: Some("Status changed from in_stock to sold".into()),
        performed_by: "usr-5e5e5e5e".into(),
        created_at: Utc::now(),
    }
}

roundtrip_and_validate!(
    cellular_device_roundtrip,
    Device,
    Device {
        id: "dev-a3f8b2c1".into(),
        identifier: DeviceIdentifier::Imei("490154203237518".into()),
        manufacturer: "Samsung".into(),
        model: "Galaxy S22".into(),
        color: Some("Phantom Black".into()),
        storage: Some("256GB".into()),
        grade: Some(Grade::B),
        status: DeviceStatus::QcRequired,
        qc_status: None,
        qc_comments: None,
        repair_completed: false,
        purchase_order_id: Some("po-77aa88bb".into()),
        sales_order_id: None,
        created_by: "usr-5e5e5e5e".into(),
        updated_by: "usr-5e5e5e5e".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    serial_device_roundtrip,
    Device,
    Device {
        id: "dev-b4c5d6e7".into(),
        identifier: DeviceIdentifier::Serial("C02XK1ZJJG5H".into()),
        manufacturer: "Apple".into(),
        model: "MacBook Air".into(),
        color: None,
        storage: None,
        grade: Some(Grade::A),
        status: DeviceStatus::InStock,
        qc_status: Some(QcResult::Pass),
        qc_comments: Some("battery 91%".into()),
        repair_completed: true,
        purchase_order_id: None,
        sales_order_id: None,
        created_by: "usr-5e5e5e5e".into(),
        updated_by: "usr-5e5e5e5e".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(device_transaction_roundtrip, DeviceTransaction, sample_transaction());

roundtrip_and_validate!(
    creation_transaction_roundtrip,
    DeviceTransaction,
    DeviceTransaction {
        previous_status: None,
        new_status: DeviceStatus::InStock,
        kind: TransactionKind::Transfer,
        notes: None,
        ..sample_transaction()
    }
);

roundtrip_and_validate!(
    device_history_roundtrip,
    DeviceHistoryEntry,
    DeviceHistoryEntry {
        transaction: sample_transaction(),
        performed_by_name: "Sam Okafor".into(),
    }
);

roundtrip_and_validate!(
    part_transaction_roundtrip,
    PartTransaction,
    PartTransaction {
        id: "ptx-00ff00ff".into(),
        part_id: "prt-12345678".into(),
        kind: PartMovement::Usage,
        previous_quantity: 12,
        new_quantity: 11,
        quantity_change: 1,
        reference_id: "dev-a3f8b2c1".into(),
        notes: Some("replacement screen".into()),
        performed_by: "usr-5e5e5e5e".into(),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    purchase_order_roundtrip,
    PurchaseOrder,
    PurchaseOrder {
        id: "po-77aa88bb".into(),
        order_number: "PO-2026-0042".into(),
        supplier_id: "sup-abcdef01".into(),
        status: OrderStatus::Open,
        created_by: "usr-5e5e5e5e".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

#[test]
fn identifier_serializes_as_single_tagged_key() {
    let json = serde_json::to_value(DeviceIdentifier::Imei("490154203237518".into())).unwrap();
    assert_eq!(json, serde_json::json!({ "imei": "490154203237518" }));
}

#[test]
fn history_entry_flattens_transaction_fields() {
    let entry = DeviceHistoryEntry {
        transaction: sample_transaction(),
        performed_by_name: "Sam Okafor".into(),
    };
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["kind"], "sale");
    assert_eq!(json["performed_by_name"], "Sam Okafor");
}

#[test]
fn schema_rejects_unknown_status() {
    let schema = serde_json::to_value(schema_for!(DeviceTransaction)).unwrap();
    let mut invalid = serde_json::to_value(sample_transaction()).unwrap();
    invalid["new_status"] = serde_json::json!("lost");
    let errors = validate_against_schema(&schema, &invalid);
    assert!(!errors.is_empty(), "Should reject unknown status value");
}

#[test]
fn schema_rejects_missing_reference() {
    let schema = serde_json::to_value(schema_for!(DeviceTransaction)).unwrap();
    let mut invalid = serde_json::to_value(sample_transaction()).unwrap();
    invalid.as_object_mut().unwrap().remove("reference_id");
    let errors = validate_against_schema(&schema, &invalid);
    assert!(!errors.is_empty(), "Should reject a row without reference_id");
}
