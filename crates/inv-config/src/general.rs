//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list/history commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// User id recorded on ledger rows when `--actor` is not given.
    #[serde(default)]
    pub default_actor: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_actor: String::new(),
        }
    }
}

impl GeneralConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 20);
        assert!(config.default_actor.is_empty());
    }

    #[test]
    fn zero_limit_is_rejected() {
        let config = GeneralConfig {
            default_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
