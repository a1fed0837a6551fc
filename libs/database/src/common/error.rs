use sea_orm::{DbErr, SqlErr};

/// Unified database error type for connection and migration plumbing.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// Connection failed after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Migration error
    #[error("Migration error: {0}")]
    MigrationError(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// A constraint violation reported by the store.
///
/// Domains use this to translate low-level integrity failures into their own
/// Conflict errors: a foreign-key violation on a delete means dependent rows
/// exist, a unique violation on an insert means a duplicate key. The carried
/// string is the driver's message, useful for picking out the constraint name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique(String),
    ForeignKey(String),
}

/// Classify a [`DbErr`] as a constraint violation, if it is one.
///
/// Returns `None` for every other kind of store error; callers must propagate
/// those unchanged rather than swallow them.
pub fn constraint_violation(err: &DbErr) -> Option<ConstraintViolation> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => Some(ConstraintViolation::Unique(msg)),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            Some(ConstraintViolation::ForeignKey(msg))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_constraint_errors_are_not_classified() {
        let err = DbErr::Custom("connection reset".to_string());
        assert_eq!(constraint_violation(&err), None);

        let err = DbErr::RecordNotFound("orders".to_string());
        assert_eq!(constraint_violation(&err), None);
    }
}
