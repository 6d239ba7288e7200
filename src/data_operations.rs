//! Data operations facade.
//!
//! Every retrieval shares one statement template (customers joined with
//! their contact type) and differs only in projection and filter. Each
//! operation returns a fresh `QueryOutcome`; the facade holds no state that a
//! call could leave behind for the next one.

use crate::core::db::{ConnectionDescriptor, FromRow, QueryExecutor, SqliteExecutor};
use crate::customers::{ContactInfo, Customer};
use crate::outcome::{self, QueryOutcome, ResultTable};
use rusqlite::types::Value;
use tracing::debug;

const CUSTOMER_PROJECTION: &str = "\
cust.CustomerIdentifier AS CustomerIdentifier, cust.CompanyName AS CompanyName, \
cust.ContactName AS ContactName, ct.ContactTitle AS ContactTitle, \
cust.Address AS Street, cust.City AS City, cust.Region AS Region, \
cust.PostalCode AS PostalCode, cust.Country AS Country, cust.Phone AS Phone, \
cust.Fax AS Fax, cust.ContactTypeIdentifier AS ContactTypeIdentifier, \
cust.ModifiedDate AS ModifiedDate";

const CONTACT_PROJECTION: &str = "cust.ContactName AS ContactName, ct.ContactTitle AS ContactTitle";

// Customers without a contact type keep their row, with no title
const CUSTOMER_SOURCE: &str = "\
FROM Customers AS cust \
LEFT JOIN ContactType AS ct ON cust.ContactTypeIdentifier = ct.ContactTypeIdentifier";

/// Name the customer identifier is bound under
pub const ID_PARAMETER: &str = "@Id";

/// Row filter applied to the customer template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Every customer, ordered by identifier
    All,
    /// The customer whose identifier is bound to `@Id`
    ById,
}

/// Builds the customer statement from fixed fragments only.
pub fn customer_statement(projection: &str, filter: Filter) -> String {
    match filter {
        Filter::All => format!("SELECT {projection} {CUSTOMER_SOURCE} ORDER BY cust.CustomerIdentifier"),
        Filter::ById => format!(
            "SELECT {projection} {CUSTOMER_SOURCE} WHERE cust.CustomerIdentifier = {ID_PARAMETER}"
        ),
    }
}

/// Customer retrieval operations over a query executor.
#[derive(Debug, Clone)]
pub struct DataOperations<E = SqliteExecutor> {
    executor: E,
}

impl DataOperations<SqliteExecutor> {
    /// Creates the facade for the store named by `descriptor`.
    pub fn new(descriptor: ConnectionDescriptor) -> Self {
        DataOperations::with_executor(SqliteExecutor::new(descriptor.build()))
    }
}

impl Default for DataOperations<SqliteExecutor> {
    fn default() -> Self {
        DataOperations::new(ConnectionDescriptor::default())
    }
}

impl<E: QueryExecutor> DataOperations<E> {
    pub fn with_executor(executor: E) -> Self {
        DataOperations { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Every customer, ordered by identifier. An empty table is `Found(vec![])`.
    pub fn list_all_customers(&self) -> QueryOutcome<Vec<Customer>> {
        let sql = customer_statement(CUSTOMER_PROJECTION, Filter::All);
        let outcome = outcome::collect_all(&self.executor, &sql, &[], Customer::from_row);
        if let Some(customers) = outcome.found() {
            debug!("Listed {} customer(s)", customers.len());
        }
        outcome
    }

    /// The customer with identifier `id`, or `NotFound`.
    pub fn get_customer_by_id(&self, id: i64) -> QueryOutcome<Customer> {
        let sql = customer_statement(CUSTOMER_PROJECTION, Filter::ById);
        outcome::first_match(&self.executor, &sql, &id_parameter(id), Customer::from_row)
    }

    /// Contact name and title of customer `id`, or `NotFound`.
    pub fn get_contact_by_id(&self, id: i64) -> QueryOutcome<ContactInfo> {
        let sql = customer_statement(CONTACT_PROJECTION, Filter::ById);
        outcome::first_match(&self.executor, &sql, &id_parameter(id), ContactInfo::from_row)
    }

    /// The unmapped customer result set, one raw row per customer.
    pub fn customer_table(&self) -> QueryOutcome<ResultTable> {
        let sql = customer_statement(CUSTOMER_PROJECTION, Filter::All);
        outcome::load_table(&self.executor, &sql, &[])
    }
}

fn id_parameter(id: i64) -> [(&'static str, Value); 1] {
    [(ID_PARAMETER, Value::Integer(id))]
}
