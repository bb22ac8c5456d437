use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Supplier { action } => {
            commands::counterparty::handle_supplier(&action, ctx, flags).await
        }
        Commands::Customer { action } => {
            commands::counterparty::handle_customer(&action, ctx, flags).await
        }
        Commands::Po { action } => commands::order::handle_purchase(&action, ctx, flags).await,
        Commands::So { action } => commands::order::handle_sales(&action, ctx, flags).await,
        Commands::Device { action } => commands::device::handle(&action, ctx, flags).await,
        Commands::Part { action } => commands::part::handle(&action, ctx, flags).await,
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
