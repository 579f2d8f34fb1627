//! SQLite repository implementation.
//!
//! Implements [`StudentRepository`] from `students_core::storage` using SQLite.

use std::path::Path;

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use students_core::storage::{RepositoryError, Result, StudentRepository};
use students_core::student::{NewStudent, Student};

use super::conversions::row_to_student;
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// All calls run on the connection's dedicated background thread, so the
/// repository can be shared across request tasks.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file and its parent directory are created if they don't
    /// exist. The schema is created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    RepositoryError::ConnectionFailed(format!(
                        "cannot create directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        tracing::debug!(path, "SQLite storage ready");

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, "create student table"))
    }
}

#[async_trait]
impl StudentRepository for SqliteRepository {
    async fn create_student(&self, student: &NewStudent) -> Result<i64> {
        let name = student.name.clone();
        let email = student.email.clone();
        let age = student.age;

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::INSERT_STUDENT).map_err(wrap_err)?;
                stmt.execute(rusqlite::params![name, email, age])
                    .map_err(wrap_err)?;
                // No RETURNING here; the rowid of the insert is the id.
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "create student"))
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Student> {
        let student = self
            .conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_STUDENT_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_student) {
                    Ok(student) => Ok(Some(student)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "get student"))?;

        student.ok_or_else(|| RepositoryError::student_not_found(id))
    }

    async fn get_students(&self) -> Result<Vec<Student>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_STUDENTS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_student).map_err(wrap_err)?;

                let mut students = Vec::new();
                for row_result in rows {
                    students.push(row_result.map_err(wrap_err)?);
                }
                Ok(students)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "get students"))
    }

    async fn update_student_by_id(&self, id: i64, student: &NewStudent) -> Result<Student> {
        let name = student.name.clone();
        let email = student.email.clone();
        let age = student.age;

        let updated = self
            .conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_STUDENT,
                        rusqlite::params![name, email, age, id],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Ok(None);
                }

                let mut stmt = conn
                    .prepare(schema::SELECT_STUDENT_BY_ID)
                    .map_err(wrap_err)?;
                let student = stmt.query_row([id], row_to_student).map_err(wrap_err)?;
                Ok(Some(student))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "update student"))?;

        updated.ok_or_else(|| RepositoryError::student_not_found(id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let rows = self
            .conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_STUDENT, [id])
                    .map_err(wrap_err)?;
                Ok(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "delete student"))?;

        if rows == 0 {
            return Err(RepositoryError::student_not_found(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "ping database"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> NewStudent {
        NewStudent::new("Ana", "ana@x.com", 21)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let id = repo.create_student(&ana()).await.unwrap();
        let student = repo.get_student_by_id(id).await.unwrap();

        assert_eq!(student, ana().with_id(id));
    }

    #[tokio::test]
    async fn test_ids_are_assigned_sequentially() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let first = repo.create_student(&ana()).await.unwrap();
        let second = repo
            .create_student(&NewStudent::new("Ben", "ben@x.com", 30))
            .await
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let result = repo.get_student_by_id(42).await;

        assert_eq!(result, Err(RepositoryError::student_not_found(42)));
    }

    #[tokio::test]
    async fn test_get_students_empty() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let students = repo.get_students().await.unwrap();

        assert!(students.is_empty());
    }

    #[tokio::test]
    async fn test_get_students_lists_each_once() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let id = repo.create_student(&ana()).await.unwrap();
        repo.create_student(&NewStudent::new("Ben", "ben@x.com", 30))
            .await
            .unwrap();

        for _ in 0..2 {
            let students = repo.get_students().await.unwrap();
            assert_eq!(students.len(), 2);
            assert_eq!(students.iter().filter(|s| s.id == id).count(), 1);
        }
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let id = repo.create_student(&ana()).await.unwrap();
        let changes = NewStudent::new("Ana Maria", "ana.maria@x.com", 22);

        let first = repo.update_student_by_id(id, &changes).await.unwrap();
        let second = repo.update_student_by_id(id, &changes).await.unwrap();

        assert_eq!(first, changes.clone().with_id(id));
        assert_eq!(first, second);
        assert_eq!(repo.get_student_by_id(id).await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_update_nonexistent() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let result = repo.update_student_by_id(7, &ana()).await;

        assert_eq!(result, Err(RepositoryError::student_not_found(7)));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let id = repo.create_student(&ana()).await.unwrap();

        repo.delete_by_id(id).await.unwrap();
        let second = repo.delete_by_id(id).await;

        assert_eq!(second, Err(RepositoryError::student_not_found(id)));
        assert!(repo.get_student_by_id(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        repo.create_student(&ana()).await.unwrap();

        let result = repo
            .create_student(&NewStudent::new("Other Ana", "ana@x.com", 40))
            .await;

        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "student",
                field: "email".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_rejected() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        repo.create_student(&ana()).await.unwrap();
        let ben = repo
            .create_student(&NewStudent::new("Ben", "ben@x.com", 30))
            .await
            .unwrap();

        let result = repo
            .update_student_by_id(ben, &NewStudent::new("Ben", "ana@x.com", 30))
            .await;

        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_ping() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        repo.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_database_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("students.db");
        let path = path.to_str().unwrap();

        let id = {
            let repo = SqliteRepository::new(path).await.unwrap();
            repo.create_student(&ana()).await.unwrap()
        };

        let repo = SqliteRepository::new(path).await.unwrap();
        assert_eq!(repo.get_student_by_id(id).await.unwrap(), ana().with_id(id));
    }
}
