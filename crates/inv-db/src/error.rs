//! Database error types for inv-db.

use inv_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or a column could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Input rejected before anything was written.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid state encountered (bad data in DB, closed order).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error, including constraint violations.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl From<CoreError> for DatabaseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::MissingField(field) => {
                Self::Validation(format!("missing required field: {field}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_surface_as_validation_failures() {
        let missing = DatabaseError::from(CoreError::MissingField("model"));
        assert!(
            matches!(missing, DatabaseError::Validation(ref msg) if msg == "missing required field: model")
        );

        let invalid = DatabaseError::from(CoreError::Validation("bad IMEI".into()));
        assert!(matches!(invalid, DatabaseError::Validation(ref msg) if msg == "bad IMEI"));
    }
}
