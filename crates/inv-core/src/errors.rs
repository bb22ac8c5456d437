//! Cross-cutting error types for the inventory crates.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `ConfigError`) are defined in
//! their respective crates. The CLI converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any inventory crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required field was missing or blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Data failed validation (format, constraints, quantity arithmetic).
    #[error("Validation error: {0}")]
    Validation(String),
}
