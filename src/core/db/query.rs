//! Query Execution Module
//!
//! The executor runs one parameterized statement against the store and hands
//! each resulting row to a visitor while the connection is open. The
//! connection belongs to the call: it is opened on entry and dropped on every
//! exit path, including faults raised by the visitor.

use crate::core::db::{ConnectionSpec, Row};
use crate::core::{DataError, MappingError, Result};
use rusqlite::types::{ToSql, Value, ValueRef};
use rusqlite::ErrorCode;
use std::sync::Arc;
use tracing::{debug, trace};

/// Tells the executor whether to keep reading rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFlow {
    Continue,
    Stop,
}

/// Capability to execute a parameterized query and stream back its rows.
///
/// Rows are delivered to `visit` in store order. Returning `RowFlow::Stop`
/// ends the sequence early; returning an error ends it immediately and the
/// error is passed back unchanged. The sequence cannot be restarted.
pub trait QueryExecutor: Send + Sync {
    fn execute(
        &self,
        sql: &str,
        params: &[(&str, Value)],
        visit: &mut dyn FnMut(Row) -> Result<RowFlow>,
    ) -> Result<()>;
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for &E {
    fn execute(
        &self,
        sql: &str,
        params: &[(&str, Value)],
        visit: &mut dyn FnMut(Row) -> Result<RowFlow>,
    ) -> Result<()> {
        (**self).execute(sql, params, visit)
    }
}

/// Query executor backed by a SQLite catalog file.
#[derive(Debug, Clone)]
pub struct SqliteExecutor {
    spec: ConnectionSpec,
}

impl SqliteExecutor {
    pub fn new(spec: ConnectionSpec) -> Self {
        SqliteExecutor { spec }
    }

    pub fn spec(&self) -> &ConnectionSpec {
        &self.spec
    }
}

impl QueryExecutor for SqliteExecutor {
    fn execute(
        &self,
        sql: &str,
        params: &[(&str, Value)],
        visit: &mut dyn FnMut(Row) -> Result<RowFlow>,
    ) -> Result<()> {
        let conn = self.spec.open()?;
        debug!("Executing on {}: {}", self.spec, sql);

        let mut stmt = conn.prepare(sql).map_err(classify)?;
        let columns: Arc<[String]> = stmt.column_names().into_iter().map(String::from).collect();
        let column_count = columns.len();

        // Named binding only; parameter values never reach the SQL text
        let bound: Vec<(&str, &dyn ToSql)> = params
            .iter()
            .map(|(name, value)| (*name, value as &dyn ToSql))
            .collect();
        let mut rows = stmt.query(bound.as_slice()).map_err(classify)?;

        let mut delivered = 0usize;
        while let Some(row) = rows.next().map_err(classify)? {
            let mut values = Vec::with_capacity(column_count);
            for (i, column) in columns.iter().enumerate() {
                values.push(owned_value(column, row.get_ref(i).map_err(classify)?)?);
            }
            delivered += 1;
            if visit(Row::new(Arc::clone(&columns), values))? == RowFlow::Stop {
                break;
            }
        }

        trace!("Delivered {} row(s) from {}", delivered, self.spec);
        Ok(())
    }
}

/// Copies a cell out of the store, refusing text that is not UTF-8.
fn owned_value(column: &str, value: ValueRef<'_>) -> Result<Value> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => Value::Text(text.to_string()),
            Err(_) => {
                return Err(MappingError::InvalidText {
                    column: column.to_string(),
                }
                .into())
            }
        },
        ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
    })
}

/// Sorts a SQLite fault into "cannot reach the store" or "statement refused".
pub fn classify(err: rusqlite::Error) -> DataError {
    let unavailable = matches!(
        &err,
        rusqlite::Error::SqliteFailure(ffi, _) if matches!(
            ffi.code,
            ErrorCode::CannotOpen
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::SystemIoFailure
                | ErrorCode::PermissionDenied
                | ErrorCode::DatabaseCorrupt
        )
    );

    if unavailable {
        DataError::StoreUnavailable(err)
    } else {
        DataError::QueryRejected(err)
    }
}
