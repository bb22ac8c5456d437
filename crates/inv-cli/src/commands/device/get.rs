use crate::cli::GlobalFlags;
use crate::cli::subcommands::IdentifierArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn run_get(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let device = ctx.service.get_device(id).await?;
    output(&device, flags.format)
}

pub async fn run_find(
    args: &IdentifierArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let identifier = super::identifier(args)?;
    let device = ctx
        .service
        .find_device_by_identifier(&identifier)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no device with identifier '{}'", identifier.value()))?;
    output(&device, flags.format)
}
