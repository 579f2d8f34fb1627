//! PostgreSQL error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `students_core::storage`.

use students_core::storage::RepositoryError;

/// Extracts the column name from a Postgres unique constraint name such as
/// `student_email_key`.
fn unique_field(constraint: Option<&str>) -> String {
    constraint
        .map(|c| c.strip_prefix("student_").unwrap_or(c))
        .map(|c| c.strip_suffix("_key").unwrap_or(c))
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

/// Maps a sqlx error to a RepositoryError.
///
/// # Error Mapping
///
/// - Unique violation (SQLSTATE 23505) → `RepositoryError::AlreadyExists`
/// - Pool and I/O errors → `RepositoryError::ConnectionFailed`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, operation: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::AlreadyExists {
                entity_type: "student",
                field: unique_field(db_err.constraint()),
            }
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => {
            RepositoryError::ConnectionFailed(format!("failed to {operation}: {err}"))
        }
        _ => RepositoryError::query_failed(operation, &err),
    }
}
