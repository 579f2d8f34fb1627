//! PostgreSQL storage backend implementation.
//!
//! This module provides a PostgreSQL-based implementation of
//! [`StudentRepository`] on top of a `sqlx` connection pool. Statements use
//! `$n` placeholders and inserts return the new id with `RETURNING`.
//!
//! [`StudentRepository`]: students_core::storage::StudentRepository

mod error;
mod repository;
mod schema;

pub use repository::PostgresRepository;
