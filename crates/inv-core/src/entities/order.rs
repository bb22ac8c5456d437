use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::OrderStatus;

/// Goods-in order placed with a supplier. Devices received against it are
/// booked into stock with a `purchase` ledger row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PurchaseOrder {
    pub id: String,
    pub order_number: String,
    pub supplier_id: String,
    pub status: OrderStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Goods-out order for a customer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SalesOrder {
    pub id: String,
    pub order_number: String,
    pub customer_id: String,
    pub status: OrderStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
