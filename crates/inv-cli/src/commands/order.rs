use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{PurchaseOrderCommands, SalesOrderCommands};
use crate::commands::shared::actor::require_actor;
use crate::context::AppContext;
use crate::output::output;

/// Handle `inv po`.
pub async fn handle_purchase(
    action: &PurchaseOrderCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PurchaseOrderCommands::Create { supplier, number } => {
            let actor = require_actor(ctx, flags).await?;
            let supplier = ctx.service.find_or_create_supplier(supplier).await?;
            let order = ctx
                .service
                .create_purchase_order(&actor, &supplier.id, number)
                .await
                .with_context(|| format!("failed to open purchase order '{number}'"))?;
            output(&order, flags.format)
        }
        PurchaseOrderCommands::Get { id } => {
            let order = ctx.service.get_purchase_order(id).await?;
            output(&order, flags.format)
        }
        PurchaseOrderCommands::Complete { id } => {
            let order = ctx.service.complete_purchase_order(id).await?;
            output(&order, flags.format)
        }
    }
}

/// Handle `inv so`.
pub async fn handle_sales(
    action: &SalesOrderCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SalesOrderCommands::Create { customer, number } => {
            let actor = require_actor(ctx, flags).await?;
            let customer = ctx.service.find_or_create_customer(customer).await?;
            let order = ctx
                .service
                .create_sales_order(&actor, &customer.id, number)
                .await
                .with_context(|| format!("failed to open sales order '{number}'"))?;
            output(&order, flags.format)
        }
        SalesOrderCommands::Get { id } => {
            let order = ctx.service.get_sales_order(id).await?;
            output(&order, flags.format)
        }
        SalesOrderCommands::Complete { id } => {
            let order = ctx.service.complete_sales_order(id).await?;
            output(&order, flags.format)
        }
    }
}
