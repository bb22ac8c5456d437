use inv_core::enums::QcResult;

use crate::cli::GlobalFlags;
use crate::commands::shared::actor::require_actor;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run_qc(
    id: &str,
    result: &str,
    comments: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let result = parse_enum::<QcResult>(result, "qc result")?;
    let actor = require_actor(ctx, flags).await?;
    let device = ctx.service.record_qc(&actor, id, result, comments).await?;
    output(&device, flags.format)
}

pub async fn run_require_qc(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = require_actor(ctx, flags).await?;
    let device = ctx.service.require_qc(&actor, id).await?;
    output(&device, flags.format)
}

pub async fn run_repair_start(
    id: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = require_actor(ctx, flags).await?;
    let device = ctx.service.start_repair(&actor, id).await?;
    output(&device, flags.format)
}

pub async fn run_repair_complete(
    id: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = require_actor(ctx, flags).await?;
    let device = ctx.service.complete_repair(&actor, id).await?;
    output(&device, flags.format)
}

pub async fn run_sell(
    id: &str,
    sales_order_id: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = require_actor(ctx, flags).await?;
    let device = ctx.service.sell_device(&actor, sales_order_id, id).await?;
    output(&device, flags.format)
}

pub async fn run_return(
    id: &str,
    notes: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = require_actor(ctx, flags).await?;
    let device = ctx.service.return_device(&actor, id, notes).await?;
    output(&device, flags.format)
}
