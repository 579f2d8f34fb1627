//! SQLite row conversion functions.

use rusqlite::Row;
use students_core::student::Student;

/// Convert a SQLite row to a Student.
///
/// Expected columns: id, name, email, age
pub fn row_to_student(row: &Row) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        age: row.get(3)?,
    })
}
