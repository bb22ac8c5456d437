use std::path::Path;

use anyhow::Context;
use inv_config::{IN_MEMORY, InvConfig};
use inv_db::service::InventoryService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: InventoryService,
    pub config: InvConfig,
}

impl AppContext {
    /// Open the database named by `--db`, falling back to `database.path`.
    pub async fn init(config: InvConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let db_path = flags
            .db
            .clone()
            .unwrap_or_else(|| config.database.path.clone());
        ensure_parent_dir(&db_path)?;

        let service = InventoryService::new_local(&db_path)
            .await
            .with_context(|| format!("failed to open inventory database at {db_path}"))?;
        tracing::debug!(db = %db_path, "inventory database ready");

        Ok(Self { service, config })
    }
}

fn ensure_parent_dir(db_path: &str) -> anyhow::Result<()> {
    if db_path == IN_MEMORY {
        return Ok(());
    }
    let Some(parent) = Path::new(db_path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    else {
        return Ok(());
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("failed to create database directory {}", parent.display()))
}
