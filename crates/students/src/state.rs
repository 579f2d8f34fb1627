//! Application state shared by all request handlers.

use std::sync::Arc;

use students_core::storage::StudentRepository;
use students_core::student::StudentValidator;

/// Shared application state.
///
/// Cloned for each request handler. Holds the storage backend behind the
/// repository trait and the payload validator built once at startup; neither
/// carries request-scoped state.
#[derive(Clone)]
pub struct AppState {
    /// Student repository for the backend selected at startup.
    pub student_repo: Arc<dyn StudentRepository>,
    /// Payload validator, read-only after construction.
    pub validator: Arc<StudentValidator>,
}

impl AppState {
    pub fn new(student_repo: Arc<dyn StudentRepository>) -> Self {
        Self {
            student_repo,
            validator: Arc::new(StudentValidator::new()),
        }
    }

    /// Creates AppState backed by an in-memory SQLite database.
    #[cfg(all(test, feature = "sqlite"))]
    pub async fn in_memory() -> Self {
        let repo = crate::storage::SqliteRepository::new_in_memory()
            .await
            .expect("in-memory SQLite database should open");
        Self::new(Arc::new(repo))
    }
}
