//! Database Module
//!
//! Store access for the data-access layer, split into three concerns:
//! - **Connection** (`connection.rs`): the immutable connection descriptor and per-call opening
//! - **Rows** (`row.rs`): store-neutral rows and strictly typed field access
//! - **Query Execution** (`query.rs`): the executor seam and its SQLite implementation
//!
//! ## Error Handling
//!
//! Everything here returns `DataError` and never swallows a fault; classification
//! into caller-facing outcomes is left to `crate::outcome`.
pub mod connection;
pub mod query;
pub mod row;

pub use connection::*;
pub use query::*;
pub use row::*;
