use async_trait::async_trait;

use crate::student::{NewStudent, Student};

use super::Result;

/// Repository for student records.
///
/// Every backend implements all operations with the same semantics, so the
/// HTTP layer can hold an `Arc<dyn StudentRepository>` without knowing which
/// engine is behind it. Operations are independent; none of them span a
/// transaction with another.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Inserts a student and returns the id assigned by the store.
    async fn create_student(&self, student: &NewStudent) -> Result<i64>;

    /// Gets a student by id.
    ///
    /// Fails with `NotFound` when no row matches.
    async fn get_student_by_id(&self, id: i64) -> Result<Student>;

    /// Gets every student in id order.
    async fn get_students(&self) -> Result<Vec<Student>>;

    /// Overwrites name, email and age of a student and returns the stored row.
    ///
    /// Fails with `NotFound` when no row matches.
    async fn update_student_by_id(&self, id: i64, student: &NewStudent) -> Result<Student>;

    /// Deletes a student by id.
    ///
    /// Fails with `NotFound` when no row was deleted.
    async fn delete_by_id(&self, id: i64) -> Result<()>;

    /// Checks that the backend can answer a trivial query.
    async fn ping(&self) -> Result<()>;
}
