//! Row Module
//!
//! A `Row` is one record exactly as the store returned it, before any domain
//! mapping. Field access is strict: each accessor names the type it expects and
//! reports a `MappingError` instead of coercing a differently typed value.

use crate::core::{MappingError, ValueType};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use std::sync::Arc;

/// Timestamp layouts accepted in text columns, tried in order
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Builds a domain record from one row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self, MappingError>;
}

/// One raw record: column names shared across the result set, plus values.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Creates a row; `values` are positional and line up with `columns`.
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Row { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the raw value stored under `column`.
    ///
    /// Column names compare case-insensitively, the way SQLite resolves them.
    pub fn value(&self, column: &str) -> Result<&Value, MappingError> {
        self.columns
            .iter()
            .position(|name| name.eq_ignore_ascii_case(column))
            .and_then(|index| self.values.get(index))
            .ok_or_else(|| MappingError::MissingColumn {
                column: column.to_string(),
            })
    }

    pub fn integer(&self, column: &str) -> Result<i64, MappingError> {
        match self.value(column)? {
            Value::Integer(i) => Ok(*i),
            other => Err(mismatch(column, ValueType::Integer, other)),
        }
    }

    pub fn optional_integer(&self, column: &str) -> Result<Option<i64>, MappingError> {
        match self.value(column)? {
            Value::Null => Ok(None),
            Value::Integer(i) => Ok(Some(*i)),
            other => Err(mismatch(column, ValueType::Integer, other)),
        }
    }

    pub fn text(&self, column: &str) -> Result<String, MappingError> {
        match self.value(column)? {
            Value::Text(s) => Ok(s.clone()),
            other => Err(mismatch(column, ValueType::Text, other)),
        }
    }

    /// Reads a nullable text column; `NULL` is `None`, never an empty string.
    pub fn optional_text(&self, column: &str) -> Result<Option<String>, MappingError> {
        match self.value(column)? {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s.clone())),
            other => Err(mismatch(column, ValueType::Text, other)),
        }
    }

    pub fn optional_timestamp(&self, column: &str) -> Result<Option<NaiveDateTime>, MappingError> {
        match self.value(column)? {
            Value::Null => Ok(None),
            Value::Text(s) => parse_timestamp(s).map(Some).ok_or_else(|| {
                MappingError::InvalidTimestamp {
                    column: column.to_string(),
                    value: s.clone(),
                }
            }),
            other => Err(mismatch(column, ValueType::Text, other)),
        }
    }
}

/// Storage type of a value
pub fn value_type(value: &Value) -> ValueType {
    match value {
        Value::Null => ValueType::Null,
        Value::Integer(_) => ValueType::Integer,
        Value::Real(_) => ValueType::Real,
        Value::Text(_) => ValueType::Text,
        Value::Blob(_) => ValueType::Blob,
    }
}

fn mismatch(column: &str, expected: ValueType, found: &Value) -> MappingError {
    MappingError::TypeMismatch {
        column: column.to_string(),
        expected,
        found: value_type(found),
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}
