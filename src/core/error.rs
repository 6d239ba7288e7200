//! Error types for the customer data-access layer.
//!
//! Every fault raised below the outcome builder is a `DataError`. Lower layers
//! only construct and propagate these values with `?`; turning them into a
//! caller-facing `QueryOutcome` happens in exactly one place (`crate::outcome`).
use std::fmt;
use thiserror::Error;

/// The storage type of a single value read from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Null,
    Integer,
    Real,
    Text,
    Blob,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "NULL",
            ValueType::Integer => "INTEGER",
            ValueType::Real => "REAL",
            ValueType::Text => "TEXT",
            ValueType::Blob => "BLOB",
        };
        f.write_str(name)
    }
}

/// A row could not be converted into a domain record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    /// The stored type differs from the type the record field expects
    #[error("column `{column}` holds {found}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: ValueType,
        found: ValueType,
    },

    /// The projection did not include a column the record needs
    #[error("column `{column}` is not part of the result set")]
    MissingColumn { column: String },

    /// Text in a timestamp column that does not parse as a date and time
    #[error("column `{column}` holds `{value}`, which is not a timestamp")]
    InvalidTimestamp { column: String, value: String },

    /// A text cell whose bytes are not valid UTF-8
    #[error("column `{column}` holds text that is not valid UTF-8")]
    InvalidText { column: String },
}

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum DataError {
    /// The connection to the store could not be established
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] rusqlite::Error),

    /// The store refused the statement (unknown column, syntax, binding, permission)
    #[error("Query rejected: {0}")]
    QueryRejected(#[source] rusqlite::Error),

    /// A returned row did not match the record being built from it
    #[error("Mapping mismatch: {0}")]
    MappingMismatch(#[from] MappingError),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result to use DataError as the error type.
pub type Result<T> = std::result::Result<T, DataError>;
