//! Purchase and sales order repository.
//!
//! Order headers only: devices link to an order through their
//! `purchase_order_id` / `sales_order_id` columns.

use chrono::{DateTime, Utc};

use inv_core::entities::{PurchaseOrder, SalesOrder};
use inv_core::enums::OrderStatus;
use inv_core::ids::{PREFIX_PURCHASE_ORDER, PREFIX_SALES_ORDER};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, now_utc, parse_datetime, parse_enum, require_text};
use crate::service::InventoryService;

/// Which order table a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OrderKind {
    Purchase,
    Sales,
}

impl OrderKind {
    const fn table(self) -> &'static str {
        match self {
            Self::Purchase => "purchase_orders",
            Self::Sales => "sales_orders",
        }
    }

    const fn party_column(self) -> &'static str {
        match self {
            Self::Purchase => "supplier_id",
            Self::Sales => "customer_id",
        }
    }

    const fn prefix(self) -> &'static str {
        match self {
            Self::Purchase => PREFIX_PURCHASE_ORDER,
            Self::Sales => PREFIX_SALES_ORDER,
        }
    }
}

pub(crate) struct OrderRow {
    id: String,
    order_number: String,
    party_id: String,
    status: OrderStatus,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn row_to_order(row: &libsql::Row) -> Result<OrderRow, DatabaseError> {
    Ok(OrderRow {
        id: row.get::<String>(0)?,
        order_number: row.get::<String>(1)?,
        party_id: row.get::<String>(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        created_by: row.get::<String>(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl From<OrderRow> for PurchaseOrder {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            order_number: row.order_number,
            supplier_id: row.party_id,
            status: row.status,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<OrderRow> for SalesOrder {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            order_number: row.order_number,
            customer_id: row.party_id,
            status: row.status,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Load an order header through `conn`, which may be an open transaction.
pub(crate) async fn load_order(
    conn: &libsql::Connection,
    kind: OrderKind,
    id: &str,
) -> Result<OrderRow, DatabaseError> {
    let sql = format!(
        "SELECT id, order_number, {}, status, created_by, created_at, updated_at
         FROM {} WHERE id = ?1",
        kind.party_column(),
        kind.table()
    );
    let mut rows = conn.query(&sql, [id]).await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    row_to_order(&row)
}

/// Fail unless the order exists and still accepts devices.
pub(crate) async fn ensure_order_open(
    conn: &libsql::Connection,
    kind: OrderKind,
    id: &str,
) -> Result<(), DatabaseError> {
    let order = load_order(conn, kind, id).await?;
    if order.status != OrderStatus::Open {
        return Err(DatabaseError::InvalidState(format!(
            "order {} is {}",
            order.order_number, order.status
        )));
    }
    Ok(())
}

impl InventoryService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank order number, or a
    /// libSQL error for a duplicate number or unknown supplier/actor.
    pub async fn create_purchase_order(
        &self,
        actor: &str,
        supplier_id: &str,
        order_number: &str,
    ) -> Result<PurchaseOrder, DatabaseError> {
        self.create_order(OrderKind::Purchase, actor, supplier_id, order_number)
            .await
            .map(PurchaseOrder::from)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank order number, or a
    /// libSQL error for a duplicate number or unknown customer/actor.
    pub async fn create_sales_order(
        &self,
        actor: &str,
        customer_id: &str,
        order_number: &str,
    ) -> Result<SalesOrder, DatabaseError> {
        self.create_order(OrderKind::Sales, actor, customer_id, order_number)
            .await
            .map(SalesOrder::from)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the order does not exist.
    pub async fn get_purchase_order(&self, id: &str) -> Result<PurchaseOrder, DatabaseError> {
        load_order(self.db().conn(), OrderKind::Purchase, id)
            .await
            .map(PurchaseOrder::from)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the order does not exist.
    pub async fn get_sales_order(&self, id: &str) -> Result<SalesOrder, DatabaseError> {
        load_order(self.db().conn(), OrderKind::Sales, id)
            .await
            .map(SalesOrder::from)
    }

    /// Close a purchase order to further receipts.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if the order is already completed.
    pub async fn complete_purchase_order(&self, id: &str) -> Result<PurchaseOrder, DatabaseError> {
        self.complete_order(OrderKind::Purchase, id)
            .await
            .map(PurchaseOrder::from)
    }

    /// Close a sales order to further sales.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if the order is already completed.
    pub async fn complete_sales_order(&self, id: &str) -> Result<SalesOrder, DatabaseError> {
        self.complete_order(OrderKind::Sales, id)
            .await
            .map(SalesOrder::from)
    }

    async fn create_order(
        &self,
        kind: OrderKind,
        actor: &str,
        party_id: &str,
        order_number: &str,
    ) -> Result<OrderRow, DatabaseError> {
        require_text("order_number", order_number)?;
        require_text("actor", actor)?;
        let order_number = order_number.trim();
        let _guard = self.lock_writes().await;
        let now = now_utc();
        let id = self.db().generate_id(kind.prefix()).await?;

        let sql = format!(
            "INSERT INTO {} (id, order_number, {}, status, created_by, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            kind.table(),
            kind.party_column()
        );
        self.db()
            .conn()
            .execute(
                &sql,
                libsql::params![
                    id.as_str(),
                    order_number,
                    party_id,
                    OrderStatus::Open.as_str(),
                    actor,
                    format_datetime(now),
                    format_datetime(now)
                ],
            )
            .await?;
        tracing::debug!(order_id = %id, order_number, "order created");

        Ok(OrderRow {
            id,
            order_number: order_number.to_string(),
            party_id: party_id.to_string(),
            status: OrderStatus::Open,
            created_by: actor.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn complete_order(&self, kind: OrderKind, id: &str) -> Result<OrderRow, DatabaseError> {
        let _guard = self.lock_writes().await;
        let mut order = load_order(self.db().conn(), kind, id).await?;
        if !order.status.can_transition_to(OrderStatus::Completed) {
            return Err(DatabaseError::InvalidState(format!(
                "order {} cannot move from {} to {}",
                order.order_number,
                order.status,
                OrderStatus::Completed
            )));
        }

        let now = now_utc();
        self.db()
            .conn()
            .execute(
                &format!(
                    "UPDATE {} SET status = ?1, updated_at = ?2 WHERE id = ?3",
                    kind.table()
                ),
                libsql::params![OrderStatus::Completed.as_str(), format_datetime(now), id],
            )
            .await?;

        order.status = OrderStatus::Completed;
        order.updated_at = now;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{test_service, test_user};

    #[tokio::test]
    async fn purchase_order_lifecycle() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let supplier = svc.find_or_create_supplier("Recycler Co").await.unwrap();

        let po = svc
            .create_purchase_order(&actor, &supplier.id, "PO-1001")
            .await
            .unwrap();
        assert!(po.id.starts_with("po-"));
        assert_eq!(po.status, OrderStatus::Open);
        assert_eq!(svc.get_purchase_order(&po.id).await.unwrap(), po);

        let done = svc.complete_purchase_order(&po.id).await.unwrap();
        assert_eq!(done.status, OrderStatus::Completed);

        let again = svc.complete_purchase_order(&po.id).await;
        assert!(matches!(again, Err(DatabaseError::InvalidState(_))));
    }

    #[tokio::test]
    async fn sales_order_requires_known_customer() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let result = svc.create_sales_order(&actor, "cus-00000000", "SO-1").await;
        assert!(matches!(result, Err(DatabaseError::LibSql(_))));
    }

    #[tokio::test]
    async fn order_numbers_are_unique() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let customer = svc.find_or_create_customer("Walk-in").await.unwrap();

        svc.create_sales_order(&actor, &customer.id, "SO-7").await.unwrap();
        let dup = svc.create_sales_order(&actor, &customer.id, "SO-7").await;
        assert!(matches!(dup, Err(DatabaseError::LibSql(_))));
    }

    #[tokio::test]
    async fn completed_order_is_not_open() {
        let svc = test_service().await;
        let actor = test_user(&svc).await;
        let customer = svc.find_or_create_customer("Walk-in").await.unwrap();
        let so = svc
            .create_sales_order(&actor, &customer.id, "SO-8")
            .await
            .unwrap();

        ensure_order_open(svc.db().conn(), OrderKind::Sales, &so.id)
            .await
            .unwrap();
        svc.complete_sales_order(&so.id).await.unwrap();
        let closed = ensure_order_open(svc.db().conn(), OrderKind::Sales, &so.id).await;
        assert!(matches!(closed, Err(DatabaseError::InvalidState(_))));
    }
}
