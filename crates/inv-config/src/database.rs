//! libSQL database configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// In-memory database sentinel understood by libSQL.
pub const IN_MEMORY: &str = ":memory:";

fn default_path() -> String {
    String::from(".inventory/inventory.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the local database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_into_project_dir() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, ".inventory/inventory.db");
        assert!(!config.is_in_memory());
    }

    #[test]
    fn blank_path_is_rejected() {
        let config = DatabaseConfig { path: "  ".into() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
