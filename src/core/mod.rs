//! Core Module
//!
//! Shared infrastructure for the data-access layer: the error types and the
//! store plumbing (connection descriptor, query executor, raw rows) that the
//! outcome builder and the data operations facade are built on.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{DataError, MappingError, Result, ValueType};
