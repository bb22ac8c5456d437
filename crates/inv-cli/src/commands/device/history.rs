use inv_core::entities::DeviceHistoryEntry;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeviceHistoryResponse {
    entries: Vec<DeviceHistoryEntry>,
}

pub async fn run(
    id: &str,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    // Unknown devices are an error rather than an empty ledger.
    let device = ctx.service.get_device(id).await?;
    let limit = effective_limit(limit, flags.limit, ctx.config.general.default_limit);
    let entries = ctx.service.device_history(&device.id, limit).await?;
    output(&DeviceHistoryResponse { entries }, flags.format)
}
