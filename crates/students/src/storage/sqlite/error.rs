//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError` from
//! `students_core::storage`. Constraint and connection failures get their own
//! variants; everything else is wrapped with the failing operation.

use students_core::storage::RepositoryError;

/// Extracts the column name from a message like
/// `UNIQUE constraint failed: student.email`.
fn unique_field(message: Option<&str>) -> String {
    message
        .and_then(|m| m.rsplit_once('.'))
        .map(|(_, column)| column.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Maps a rusqlite error to a RepositoryError.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_UNIQUE` → `RepositoryError::AlreadyExists`
/// - Cannot open database → `RepositoryError::ConnectionFailed`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error, operation: &str) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, message)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepositoryError::AlreadyExists {
                entity_type: "student",
                field: unique_field(message.as_deref()),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        _ => RepositoryError::query_failed(operation, err),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
///
/// This is the main entry point for error mapping in async code. The
/// `operation` names what was being attempted, e.g. `"create student"`.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error, operation: &str) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, operation)
        }
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::query_failed(operation, &err),
    }
}
