use crate::cli::GlobalFlags;
use crate::cli::subcommands::CounterpartyCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `inv supplier`.
pub async fn handle_supplier(
    action: &CounterpartyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CounterpartyCommands::Add { name } => {
            let supplier = ctx.service.find_or_create_supplier(name).await?;
            output(&supplier, flags.format)
        }
        CounterpartyCommands::Get { id } => {
            let supplier = ctx.service.get_supplier(id).await?;
            output(&supplier, flags.format)
        }
    }
}

/// Handle `inv customer`.
pub async fn handle_customer(
    action: &CounterpartyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CounterpartyCommands::Add { name } => {
            let customer = ctx.service.find_or_create_customer(name).await?;
            output(&customer, flags.format)
        }
        CounterpartyCommands::Get { id } => {
            let customer = ctx.service.get_customer(id).await?;
            output(&customer, flags.format)
        }
    }
}
