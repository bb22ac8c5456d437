use inv_core::entities::Device;
use inv_core::enums::DeviceStatus;
use inv_db::repos::device::DeviceFilter;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_optional_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeviceListResponse {
    devices: Vec<Device>,
}

pub async fn run(
    status: Option<&str>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = DeviceFilter {
        status: parse_optional_enum::<DeviceStatus>(status, "status")?,
        limit: Some(effective_limit(
            limit,
            flags.limit,
            ctx.config.general.default_limit,
        )),
    };
    let devices = ctx.service.list_devices(&filter).await?;
    output(&DeviceListResponse { devices }, flags.format)
}
