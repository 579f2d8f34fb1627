//! Core types for the students API.
//!
//! - [`student`]: the student record and its payload validator.
//! - [`storage`]: the repository contract every backend implements, its
//!   error taxonomy and the mapping of those errors to HTTP status codes.

pub mod storage;
pub mod student;
