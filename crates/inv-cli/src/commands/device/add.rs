use anyhow::Context;
use inv_db::updates::device::NewDevice;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::NewDeviceArgs;
use crate::commands::shared::actor::require_actor;
use crate::commands::shared::parse::{parse_enum, parse_grade};
use crate::context::AppContext;
use crate::output::output;

pub async fn run_add(
    args: &NewDeviceArgs,
    status: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = require_actor(ctx, flags).await?;
    let mut new = new_device(args)?;
    if let Some(status) = status {
        new = new.status(parse_enum(status, "status")?);
    }

    let device = ctx
        .service
        .create_device(&actor, new)
        .await
        .context("failed to book device into stock")?;
    output(&device, flags.format)
}

pub async fn run_receive(
    purchase_order_id: &str,
    args: &NewDeviceArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = require_actor(ctx, flags).await?;
    let device = ctx
        .service
        .receive_device(&actor, purchase_order_id, new_device(args)?)
        .await
        .with_context(|| format!("failed to receive device on {purchase_order_id}"))?;
    output(&device, flags.format)
}

fn new_device(args: &NewDeviceArgs) -> anyhow::Result<NewDevice> {
    let mut new = NewDevice::new(
        super::identifier(&args.identifier)?,
        &args.manufacturer,
        &args.model,
    );
    if let Some(color) = &args.color {
        new = new.color(color);
    }
    if let Some(storage) = &args.storage {
        new = new.storage(storage);
    }
    if let Some(grade) = &args.grade {
        new = new.grade(parse_grade(grade)?);
    }
    Ok(new)
}
