use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("no {entity_type} found with id: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} with this {field} already exists")]
    AlreadyExists {
        entity_type: &'static str,
        field: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("{0}")]
    QueryFailed(String),
}

impl RepositoryError {
    /// Shorthand for a missing student.
    pub fn student_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "student",
            id: id.to_string(),
        }
    }

    /// Wraps a driver error with the operation that produced it.
    pub fn query_failed(operation: &str, err: impl std::fmt::Display) -> Self {
        Self::QueryFailed(format!("failed to {operation}: {err}"))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        assert_eq!(
            RepositoryError::student_not_found(1).to_string(),
            "no student found with id: 1"
        );
    }

    #[test]
    fn test_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "student",
            field: "email".to_string(),
        };
        assert_eq!(error.to_string(), "student with this email already exists");
    }

    #[test]
    fn test_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("pool timed out".to_string());
        assert_eq!(error.to_string(), "Connection failed: pool timed out");
    }

    #[test]
    fn test_query_failed_carries_operation() {
        let error = RepositoryError::query_failed("update student", "disk I/O error");
        assert_eq!(
            error.to_string(),
            "failed to update student: disk I/O error"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(RepositoryError::student_not_found(3).is_not_found());
        assert!(!RepositoryError::query_failed("get students", "x").is_not_found());
    }
}
