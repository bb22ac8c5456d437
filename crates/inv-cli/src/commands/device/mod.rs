mod add;
mod get;
mod history;
mod list;
mod update;
mod workflow;

use inv_core::entities::DeviceIdentifier;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{DeviceCommands, IdentifierArgs};
use crate::context::AppContext;

/// Handle `inv device`.
pub async fn handle(
    action: &DeviceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DeviceCommands::Add { device, status } => {
            add::run_add(device, status.as_deref(), ctx, flags).await
        }
        DeviceCommands::Receive { po, device } => add::run_receive(po, device, ctx, flags).await,
        DeviceCommands::Get { id } => get::run_get(id, ctx, flags).await,
        DeviceCommands::Find { identifier } => get::run_find(identifier, ctx, flags).await,
        DeviceCommands::List { status, limit } => {
            list::run(status.as_deref(), *limit, ctx, flags).await
        }
        DeviceCommands::Update { id, fields } => update::run(id, fields, ctx, flags).await,
        DeviceCommands::History { id, limit } => history::run(id, *limit, ctx, flags).await,
        DeviceCommands::Qc {
            id,
            result,
            comments,
        } => workflow::run_qc(id, result, comments.as_deref(), ctx, flags).await,
        DeviceCommands::RequireQc { id } => workflow::run_require_qc(id, ctx, flags).await,
        DeviceCommands::RepairStart { id } => workflow::run_repair_start(id, ctx, flags).await,
        DeviceCommands::RepairComplete { id } => {
            workflow::run_repair_complete(id, ctx, flags).await
        }
        DeviceCommands::Sell { id, so } => workflow::run_sell(id, so, ctx, flags).await,
        DeviceCommands::Return { id, notes } => {
            workflow::run_return(id, notes.as_deref(), ctx, flags).await
        }
    }
}

fn identifier(args: &IdentifierArgs) -> anyhow::Result<DeviceIdentifier> {
    DeviceIdentifier::from_columns(args.imei.clone(), args.serial.clone())
        .ok_or_else(|| anyhow::anyhow!("pass exactly one of --imei or --serial"))
}
