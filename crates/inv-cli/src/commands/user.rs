use inv_core::entities::User;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct UserListResponse {
    users: Vec<User>,
}

/// Handle `inv user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::Add {
            display_name,
            email,
        } => {
            let user = ctx
                .service
                .create_user(display_name, email.as_deref())
                .await?;
            output(&user, flags.format)
        }
        UserCommands::Get { id } => {
            let user = ctx.service.get_user(id).await?;
            output(&user, flags.format)
        }
        UserCommands::List { limit } => {
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            let users = ctx.service.list_users(limit).await?;
            output(&UserListResponse { users }, flags.format)
        }
    }
}
