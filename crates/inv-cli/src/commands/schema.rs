use anyhow::bail;
use inv_core::entities::{
    Customer, Device, DeviceHistoryEntry, DeviceTransaction, Part, PartHistoryEntry,
    PartTransaction, PurchaseOrder, SalesOrder, Supplier, User,
};
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

const SCHEMA_TYPES: [&str; 11] = [
    "customer",
    "device",
    "device-history-entry",
    "device-transaction",
    "part",
    "part-history-entry",
    "part-transaction",
    "purchase-order",
    "sales-order",
    "supplier",
    "user",
];

/// Handle `inv schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_for_type(&args.type_name)?;
    output(&schema, flags.format)
}

fn schema_for_type(type_name: &str) -> anyhow::Result<Schema> {
    let schema = match type_name.trim().replace('_', "-").as_str() {
        "customer" => schema_for!(Customer),
        "device" => schema_for!(Device),
        "device-history-entry" => schema_for!(DeviceHistoryEntry),
        "device-transaction" => schema_for!(DeviceTransaction),
        "part" => schema_for!(Part),
        "part-history-entry" => schema_for!(PartHistoryEntry),
        "part-transaction" => schema_for!(PartTransaction),
        "purchase-order" => schema_for!(PurchaseOrder),
        "sales-order" => schema_for!(SalesOrder),
        "supplier" => schema_for!(Supplier),
        "user" => schema_for!(User),
        _ => bail!(
            "unknown schema type '{type_name}'; expected one of: {}",
            SCHEMA_TYPES.join(", ")
        ),
    };
    Ok(schema)
}
