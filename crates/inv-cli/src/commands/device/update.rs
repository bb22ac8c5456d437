use anyhow::bail;
use inv_core::enums::{DeviceStatus, QcResult};
use inv_db::updates::device::{DeviceUpdate, DeviceUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DeviceUpdateArgs;
use crate::commands::shared::actor::require_actor;
use crate::commands::shared::parse::{parse_grade, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    fields: &DeviceUpdateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let update = build_update(fields)?;
    let actor = require_actor(ctx, flags).await?;
    let device = ctx.service.update_device(&actor, id, update).await?;
    output(&device, flags.format)
}

fn build_update(fields: &DeviceUpdateArgs) -> anyhow::Result<DeviceUpdate> {
    let mut builder = DeviceUpdateBuilder::new();

    if let Some(manufacturer) = &fields.manufacturer {
        builder = builder.manufacturer(manufacturer);
    }
    if let Some(model) = &fields.model {
        builder = builder.model(model);
    }
    if let Some(color) = &fields.color {
        builder = builder.color(Some(color.clone()));
    }
    if let Some(storage) = &fields.storage {
        builder = builder.storage(Some(storage.clone()));
    }
    if let Some(grade) = &fields.grade {
        builder = builder.grade(Some(parse_grade(grade)?));
    }
    if let Some(status) = parse_optional_enum::<DeviceStatus>(fields.status.as_deref(), "status")? {
        builder = builder.status(status);
    }
    if fields.clear_qc {
        builder = builder.qc_status(None).qc_comments(None);
    }
    if let Some(result) =
        parse_optional_enum::<QcResult>(fields.qc_status.as_deref(), "qc_status")?
    {
        builder = builder.qc_status(Some(result));
    }
    if let Some(comments) = &fields.qc_comments {
        builder = builder.qc_comments(Some(comments.clone()));
    }
    if let Some(done) = fields.repair_completed {
        builder = builder.repair_completed(done);
    }

    let update = builder.build();
    if update.is_empty() {
        bail!("nothing to update; pass at least one field flag");
    }
    Ok(update)
}

#[cfg(test)]
mod tests {
    use inv_core::enums::{DeviceStatus, Grade, QcResult};
    use pretty_assertions::assert_eq;

    use super::build_update;
    use crate::cli::subcommands::DeviceUpdateArgs;

    #[test]
    fn empty_flags_are_rejected() {
        let err = build_update(&DeviceUpdateArgs::default()).expect_err("should fail");
        assert!(err.to_string().contains("nothing to update"));
    }

    #[test]
    fn status_qc_and_repair_flags_map_to_fields() {
        let fields = DeviceUpdateArgs {
            status: Some(String::from("qc-required")),
            qc_status: Some(String::from("pass")),
            repair_completed: Some(true),
            grade: Some(String::from("a")),
            ..DeviceUpdateArgs::default()
        };
        let update = build_update(&fields).expect("should build");

        assert_eq!(update.status, Some(DeviceStatus::QcRequired));
        assert_eq!(update.qc_status, Some(Some(QcResult::Pass)));
        assert_eq!(update.repair_completed, Some(true));
        assert_eq!(update.grade, Some(Some(Grade::A)));
        assert_eq!(update.model, None);
    }

    #[test]
    fn clear_qc_nulls_verdict_and_comments() {
        let fields = DeviceUpdateArgs {
            clear_qc: true,
            ..DeviceUpdateArgs::default()
        };
        let update = build_update(&fields).expect("should build");

        assert_eq!(update.qc_status, Some(None));
        assert_eq!(update.qc_comments, Some(None));
    }
}
