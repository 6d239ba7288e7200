//! Customer data access over a relational store.
//!
//! Queries run through a [`core::db::QueryExecutor`], rows are mapped into
//! records by [`core::db::FromRow`] implementations, and every call reports a
//! self-contained [`outcome::QueryOutcome`].

// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod config;
pub mod customers;
pub mod data_operations;
pub mod outcome;
pub mod sample_data;

pub use crate::core::db::{ConnectionDescriptor, QueryExecutor, SqliteExecutor};
pub use crate::customers::{ContactInfo, Customer};
pub use crate::data_operations::DataOperations;
pub use crate::outcome::{ErrorInfo, ErrorKind, QueryOutcome};
