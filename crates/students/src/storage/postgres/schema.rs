//! PostgreSQL schema definitions and SQL query constants.

/// SQL statement to create the student table.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS student (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    age INTEGER NOT NULL
)
"#;

pub const INSERT_STUDENT: &str = r#"
INSERT INTO student (name, email, age)
VALUES ($1, $2, $3)
RETURNING id
"#;

pub const SELECT_STUDENT_BY_ID: &str = r#"
SELECT id, name, email, age
FROM student
WHERE id = $1
LIMIT 1
"#;

pub const SELECT_STUDENTS: &str = r#"
SELECT id, name, email, age
FROM student
ORDER BY id
"#;

pub const UPDATE_STUDENT: &str = r#"
UPDATE student
SET name = $1, email = $2, age = $3
WHERE id = $4
"#;

pub const DELETE_STUDENT: &str = r#"
DELETE FROM student
WHERE id = $1
"#;

pub const PING: &str = "SELECT 1";
