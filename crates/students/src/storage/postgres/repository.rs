//! PostgreSQL repository implementation.
//!
//! Implements [`StudentRepository`] from `students_core::storage` using a
//! `sqlx` connection pool.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use students_core::storage::{RepositoryError, Result, StudentRepository};
use students_core::student::{NewStudent, Student};

use super::error::map_sqlx_error;
use super::schema;

/// Row shape shared by every student query: id, name, email, age.
type StudentRow = (i64, String, String, i32);

fn row_to_student((id, name, email, age): StudentRow) -> Student {
    Student {
        id,
        name,
        email,
        age,
    }
}

/// PostgreSQL-backed repository.
///
/// Each operation checks a connection out of the pool for the duration of a
/// single statement.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Connects to the database and creates the schema if needed.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        let repo = Self::new(pool);
        repo.init_schema().await?;

        tracing::debug!(max_connections, "PostgreSQL storage ready");

        Ok(repo)
    }

    /// Creates a repository from an existing pool.
    ///
    /// The schema is not created; call [`connect`](Self::connect) for that.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    async fn init_schema(&self) -> Result<()> {
        sqlx::query(schema::CREATE_TABLES)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "create student table"))?;

        Ok(())
    }
}

#[async_trait]
impl StudentRepository for PostgresRepository {
    async fn create_student(&self, student: &NewStudent) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(schema::INSERT_STUDENT)
            .bind(&student.name)
            .bind(&student.email)
            .bind(student.age)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "create student"))
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Student> {
        let row = sqlx::query_as::<_, StudentRow>(schema::SELECT_STUDENT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "get student"))?;

        row.map(row_to_student)
            .ok_or_else(|| RepositoryError::student_not_found(id))
    }

    async fn get_students(&self) -> Result<Vec<Student>> {
        let rows = sqlx::query_as::<_, StudentRow>(schema::SELECT_STUDENTS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "get students"))?;

        Ok(rows.into_iter().map(row_to_student).collect())
    }

    async fn update_student_by_id(&self, id: i64, student: &NewStudent) -> Result<Student> {
        let result = sqlx::query(schema::UPDATE_STUDENT)
            .bind(&student.name)
            .bind(&student.email)
            .bind(student.age)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "update student"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::student_not_found(id));
        }

        self.get_student_by_id(id).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let result = sqlx::query(schema::DELETE_STUDENT)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "delete student"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::student_not_found(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query(schema::PING)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "ping database"))?;

        Ok(())
    }
}

/// These tests need a running PostgreSQL server. Run them with
/// `TEST_DATABASE_URL=postgres://... cargo test -p students -- --ignored`.
#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    async fn repo() -> PostgresRepository {
        let url = std::env::var("TEST_DATABASE_URL")
            .expect("TEST_DATABASE_URL must be set to run PostgreSQL tests");
        PostgresRepository::connect(&url, 2).await.unwrap()
    }

    /// Emails must be unique across the shared table, so tag each one.
    fn unique_email(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("{prefix}-{nanos}@example.com")
    }

    #[tokio::test]
    #[ignore]
    async fn test_create_and_get() {
        let repo = repo().await;
        let student = NewStudent::new("Ana", unique_email("ana"), 21);

        let id = repo.create_student(&student).await.unwrap();

        assert_eq!(
            repo.get_student_by_id(id).await.unwrap(),
            student.with_id(id)
        );
    }

    #[tokio::test]
    #[ignore]
    async fn test_get_students_contains_created_once() {
        let repo = repo().await;
        let id = repo
            .create_student(&NewStudent::new("Ben", unique_email("ben"), 30))
            .await
            .unwrap();

        let students = repo.get_students().await.unwrap();

        assert_eq!(students.iter().filter(|s| s.id == id).count(), 1);
    }

    #[tokio::test]
    #[ignore]
    async fn test_update_and_update_nonexistent() {
        let repo = repo().await;
        let id = repo
            .create_student(&NewStudent::new("Cy", unique_email("cy"), 19))
            .await
            .unwrap();
        let changes = NewStudent::new("Cyrus", unique_email("cyrus"), 20);

        let updated = repo.update_student_by_id(id, &changes).await.unwrap();
        assert_eq!(updated, changes.clone().with_id(id));

        let missing = repo.update_student_by_id(i64::MAX, &changes).await;
        assert_eq!(missing, Err(RepositoryError::student_not_found(i64::MAX)));
    }

    #[tokio::test]
    #[ignore]
    async fn test_delete_twice() {
        let repo = repo().await;
        let id = repo
            .create_student(&NewStudent::new("Di", unique_email("di"), 25))
            .await
            .unwrap();

        repo.delete_by_id(id).await.unwrap();

        assert_eq!(
            repo.delete_by_id(id).await,
            Err(RepositoryError::student_not_found(id))
        );
    }

    #[tokio::test]
    #[ignore]
    async fn test_duplicate_email_is_rejected() {
        let repo = repo().await;
        let email = unique_email("dup");
        repo.create_student(&NewStudent::new("Ed", email.clone(), 40))
            .await
            .unwrap();

        let result = repo
            .create_student(&NewStudent::new("Edna", email, 41))
            .await;

        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "student",
                field: "email".to_string(),
            })
        );
    }
}
