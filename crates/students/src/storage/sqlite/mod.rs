//! SQLite storage backend implementation.
//!
//! This module provides a SQLite-based implementation of [`StudentRepository`]
//! using `rusqlite` for synchronous operations and `tokio-rusqlite` for async
//! wrapping. Statements use `?n` positional placeholders.
//!
//! [`StudentRepository`]: students_core::storage::StudentRepository

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
