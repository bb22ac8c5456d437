use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;

/// Resolve the user recorded on ledger rows and check that they exist.
///
/// `--actor` wins over `general.default_actor`.
pub async fn require_actor(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<String> {
    let actor = pick_actor(flags.actor.as_deref(), &ctx.config.general.default_actor)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No acting user. Pass --actor <user-id> or set INVENTORY_GENERAL__DEFAULT_ACTOR \
                 (create one with 'inv user add <name>')."
            )
        })?;

    ctx.service
        .get_user(&actor)
        .await
        .with_context(|| format!("unknown acting user '{actor}'"))?;
    Ok(actor)
}

fn pick_actor(flag: Option<&str>, configured: &str) -> Option<String> {
    [flag.unwrap_or_default(), configured]
        .into_iter()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .map(String::from)
}
