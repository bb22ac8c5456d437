//! ID prefix constants.
//!
//! IDs are generated in SQL as `{prefix}-{8 hex chars}` (see `InventoryDb::generate_id`).

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_SUPPLIER: &str = "sup";
pub const PREFIX_CUSTOMER: &str = "cus";
pub const PREFIX_PURCHASE_ORDER: &str = "po";
pub const PREFIX_SALES_ORDER: &str = "so";
pub const PREFIX_DEVICE: &str = "dev";
pub const PREFIX_DEVICE_TRANSACTION: &str = "dtx";
pub const PREFIX_PART: &str = "prt";
pub const PREFIX_PART_TRANSACTION: &str = "ptx";

/// Every prefix in use, for exhaustive ID-format tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_USER,
    PREFIX_SUPPLIER,
    PREFIX_CUSTOMER,
    PREFIX_PURCHASE_ORDER,
    PREFIX_SALES_ORDER,
    PREFIX_DEVICE,
    PREFIX_DEVICE_TRANSACTION,
    PREFIX_PART,
    PREFIX_PART_TRANSACTION,
];
