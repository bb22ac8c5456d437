use inv_core::entities::{Part, PartHistoryEntry, PartTransaction};
use inv_core::enums::PartMovement;
use inv_db::updates::part::{NewPart, PartAdjustment};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{PartAdjustArgs, PartCommands};
use crate::commands::shared::actor::require_actor;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct PartListResponse {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct PartAdjustResponse {
    part: Part,
    transaction: PartTransaction,
}

#[derive(Debug, Serialize)]
struct PartHistoryResponse {
    entries: Vec<PartHistoryEntry>,
}

/// Handle `inv part`.
pub async fn handle(
    action: &PartCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PartCommands::Add {
            sku,
            name,
            quantity,
        } => {
            let actor = require_actor(ctx, flags).await?;
            let part = ctx
                .service
                .create_part(&actor, NewPart::new(sku, name, *quantity))
                .await?;
            output(&part, flags.format)
        }
        PartCommands::Adjust { id, movement } => adjust(id, movement, ctx, flags).await,
        PartCommands::Get { id } => {
            let part = resolve_part(ctx, id).await?;
            output(&part, flags.format)
        }
        PartCommands::List { limit } => {
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            let parts = ctx.service.list_parts(limit).await?;
            output(&PartListResponse { parts }, flags.format)
        }
        PartCommands::History { id, limit } => {
            let part = resolve_part(ctx, id).await?;
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            let entries = ctx.service.part_history(&part.id, limit).await?;
            output(&PartHistoryResponse { entries }, flags.format)
        }
    }
}

async fn adjust(
    id: &str,
    movement: &PartAdjustArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = require_actor(ctx, flags).await?;
    let kind = parse_enum::<PartMovement>(&movement.kind, "kind")?;
    let part = resolve_part(ctx, id).await?;

    let adjustment = build_adjustment(&part, movement, kind);
    let (part, transaction) = ctx
        .service
        .adjust_part_quantity(&actor, &part.id, adjustment)
        .await?;
    output(&PartAdjustResponse { part, transaction }, flags.format)
}

/// Accept either a SKU or a part ID.
async fn resolve_part(ctx: &AppContext, key: &str) -> anyhow::Result<Part> {
    if let Some(part) = ctx.service.find_part_by_sku(key).await? {
        return Ok(part);
    }
    Ok(ctx.service.get_part(key).await?)
}

/// Without `--change` the recorded change is the actual difference; with it,
/// the service rejects a mismatch.
fn build_adjustment(part: &Part, args: &PartAdjustArgs, kind: PartMovement) -> PartAdjustment {
    PartAdjustment {
        kind,
        new_quantity: args.quantity,
        quantity_change: args
            .change
            .unwrap_or_else(|| (args.quantity - part.quantity).abs()),
        reference_id: args.reference.clone().unwrap_or_else(|| part.id.clone()),
        notes: args.notes.clone(),
    }
}
