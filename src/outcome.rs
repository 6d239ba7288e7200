//! Outcome builder.
//!
//! Runs a query through an executor and a row mapper and classifies what
//! happened into exactly one `QueryOutcome`. This is the only place where a
//! `DataError` stops propagating: it is logged once, wrapped into an
//! `ErrorInfo` with its original cause, and returned as `Failure`.

use crate::core::db::{QueryExecutor, Row, RowFlow};
use crate::core::{DataError, MappingError};
use rusqlite::types::Value;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Classification of a failed query execution.
///
/// Finding nothing is not an error and has no kind; see `QueryOutcome::NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The connection to the store could not be established
    StoreUnavailable,
    /// The store rejected the statement
    QueryRejected,
    /// A row's field did not match the expected type
    MappingMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::StoreUnavailable => "store unavailable",
            ErrorKind::QueryRejected => "query rejected",
            ErrorKind::MappingMismatch => "mapping mismatch",
        };
        f.write_str(name)
    }
}

impl DataError {
    /// Kind reported for this fault when it ends a query.
    ///
    /// Configuration and I/O faults mean the store could not be reached.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::QueryRejected(_) => ErrorKind::QueryRejected,
            DataError::MappingMismatch(_) => ErrorKind::MappingMismatch,
            DataError::StoreUnavailable(_) | DataError::Config(_) | DataError::Io(_) => {
                ErrorKind::StoreUnavailable
            }
        }
    }
}

/// Diagnostic detail captured at the point a query failed.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    kind: ErrorKind,
    message: String,
    cause: Arc<DataError>,
}

impl ErrorInfo {
    pub fn capture(err: DataError) -> Self {
        ErrorInfo {
            kind: err.kind(),
            message: err.to_string(),
            cause: Arc::new(err),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The original fault, preserved for diagnostics
    pub fn cause(&self) -> &DataError {
        &self.cause
    }

    /// Mapping detail when the failure came from the row mapper
    pub fn mapping_error(&self) -> Option<&MappingError> {
        match self.cause() {
            DataError::MappingMismatch(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl Error for ErrorInfo {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

impl From<DataError> for ErrorInfo {
    fn from(err: DataError) -> Self {
        ErrorInfo::capture(err)
    }
}

/// The classified result of one query execution.
///
/// `Found` means execution and mapping succeeded. `NotFound` means execution
/// succeeded but no row matched a lookup by key. `Failure` means no data from
/// the call can be trusted.
#[derive(Debug, Clone)]
pub enum QueryOutcome<T> {
    Found(T),
    NotFound,
    Failure(ErrorInfo),
}

impl<T> QueryOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, QueryOutcome::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryOutcome::NotFound)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, QueryOutcome::Failure(_))
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            QueryOutcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_found(self) -> Option<T> {
        match self {
            QueryOutcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            QueryOutcome::Failure(info) => Some(info),
            _ => None,
        }
    }

    /// Kind of the failure, if this outcome is one
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(ErrorInfo::kind)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> QueryOutcome<U> {
        match self {
            QueryOutcome::Found(value) => QueryOutcome::Found(f(value)),
            QueryOutcome::NotFound => QueryOutcome::NotFound,
            QueryOutcome::Failure(info) => QueryOutcome::Failure(info),
        }
    }

    /// Converts into a `Result` for callers that want to use `?`.
    pub fn into_result(self) -> Result<Option<T>, ErrorInfo> {
        match self {
            QueryOutcome::Found(value) => Ok(Some(value)),
            QueryOutcome::NotFound => Ok(None),
            QueryOutcome::Failure(info) => Err(info),
        }
    }
}

/// A whole result set of raw rows, in store order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    pub rows: Vec<Row>,
}

impl ResultTable {
    /// Column names of the result set; empty when there are no rows
    pub fn columns(&self) -> &[String] {
        self.rows.first().map(Row::columns).unwrap_or(&[])
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Drains every row through `map`. No rows is a valid answer: `Found(vec![])`.
pub fn collect_all<E, T, M>(
    executor: &E,
    sql: &str,
    params: &[(&str, Value)],
    map: M,
) -> QueryOutcome<Vec<T>>
where
    E: QueryExecutor + ?Sized,
    M: Fn(&Row) -> Result<T, MappingError>,
{
    let mut items = Vec::new();
    let run = executor.execute(sql, params, &mut |row| {
        items.push(map(&row)?);
        Ok(RowFlow::Continue)
    });

    match run {
        Ok(()) => QueryOutcome::Found(items),
        Err(err) => failure(err, sql),
    }
}

/// Maps the first row only. Zero rows is `NotFound`.
pub fn first_match<E, T, M>(
    executor: &E,
    sql: &str,
    params: &[(&str, Value)],
    map: M,
) -> QueryOutcome<T>
where
    E: QueryExecutor + ?Sized,
    M: Fn(&Row) -> Result<T, MappingError>,
{
    let mut first = None;
    let run = executor.execute(sql, params, &mut |row| {
        first = Some(map(&row)?);
        Ok(RowFlow::Stop)
    });

    match run {
        Ok(()) => first.map_or(QueryOutcome::NotFound, QueryOutcome::Found),
        Err(err) => failure(err, sql),
    }
}

/// Loads the raw result set without mapping it to records.
pub fn load_table<E>(executor: &E, sql: &str, params: &[(&str, Value)]) -> QueryOutcome<ResultTable>
where
    E: QueryExecutor + ?Sized,
{
    let mut table = ResultTable::default();
    let run = executor.execute(sql, params, &mut |row| {
        table.rows.push(row);
        Ok(RowFlow::Continue)
    });

    match run {
        Ok(()) => QueryOutcome::Found(table),
        Err(err) => failure(err, sql),
    }
}

fn failure<T>(err: DataError, sql: &str) -> QueryOutcome<T> {
    let info = ErrorInfo::capture(err);
    warn!(kind = %info.kind(), "Query failed: {} [{}]", info.message(), sql);
    QueryOutcome::Failure(info)
}
