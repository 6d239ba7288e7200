//! End-to-end tests of the data operations against a seeded SQLite catalog.

use customer_access::core::db::{FromRow, RowFlow};
use customer_access::core::MappingError;
use customer_access::customers::columns;
use customer_access::outcome::{self, ErrorKind, QueryOutcome};
use customer_access::sample_data::{self, REFERENCE_CUSTOMER_COUNT};
use customer_access::{ConnectionDescriptor, Customer, DataOperations, QueryExecutor};
use rusqlite::Connection;
use std::cell::Cell;
use std::path::PathBuf;
use tempfile::TempDir;

const CATALOG: &str = "NorthWindAzure";

/// A seeded catalog in its own temporary directory
struct ReferenceStore {
    dir: TempDir,
}

impl ReferenceStore {
    fn new() -> Self {
        let store = ReferenceStore {
            dir: tempfile::tempdir().unwrap(),
        };
        sample_data::seed_reference_store(&store.path()).unwrap();
        store
    }

    fn path(&self) -> PathBuf {
        self.dir.path().join(format!("{}.db", CATALOG))
    }

    fn descriptor(&self) -> ConnectionDescriptor {
        ConnectionDescriptor::new(self.dir.path().to_string_lossy(), CATALOG)
    }

    fn ops(&self) -> DataOperations {
        DataOperations::new(self.descriptor())
    }

    fn execute(&self, sql: &str) {
        Connection::open(self.path()).unwrap().execute_batch(sql).unwrap();
    }
}

#[test]
fn test_list_all_customers_returns_every_row() {
    let store = ReferenceStore::new();
    let customers = store.ops().list_all_customers().into_found().unwrap();

    assert_eq!(customers.len(), REFERENCE_CUSTOMER_COUNT);
    let ids: Vec<i64> = customers.iter().map(|c| c.id).collect();
    assert_eq!(ids, (1..=91).collect::<Vec<i64>>());

    // Rows with absent optional fields are kept, with the absence explicit
    assert!(customers.iter().any(|c| c.fax.is_none()));
    assert!(customers.iter().any(|c| c.region.is_none()));
    assert!(customers.iter().any(|c| c.postal_code.is_none()));
    assert!(customers
        .iter()
        .all(|c| c.fax.as_deref() != Some("") && c.region.as_deref() != Some("")));
}

#[test]
fn test_get_customer_by_id_found() {
    let store = ReferenceStore::new();
    let ops = store.ops();

    for id in [1, 14, 57, 91] {
        match ops.get_customer_by_id(id) {
            QueryOutcome::Found(customer) => {
                assert_eq!(customer.id, id);
                assert_eq!(Some(customer.company_name.as_str()), sample_data::company_name(id));
            }
            other => panic!("Expected customer {} to be found, got {:?}", id, other),
        }
    }
}

#[test]
fn test_get_customer_by_id_not_found() {
    let store = ReferenceStore::new();
    let ops = store.ops();

    for id in [999, 991, 0, -1] {
        let outcome = ops.get_customer_by_id(id);
        assert!(outcome.is_not_found(), "id {} should be NotFound, got {:?}", id, outcome);
    }
}

#[test]
fn test_get_contact_by_id() {
    let store = ReferenceStore::new();
    let ops = store.ops();

    let contact = ops.get_contact_by_id(14).into_found().unwrap();
    let customer = ops.get_customer_by_id(14).into_found().unwrap();
    assert!(!contact.contact_name.trim().is_empty());
    assert_eq!(contact.contact_name, customer.contact_name);
    assert_eq!(contact.contact_title, customer.contact_title);

    assert!(ops.get_contact_by_id(991).is_not_found());
}

#[test]
fn test_customer_table_holds_raw_rows() {
    let store = ReferenceStore::new();
    let table = store.ops().customer_table().into_found().unwrap();

    assert_eq!(table.row_count(), REFERENCE_CUSTOMER_COUNT);
    assert_eq!(table.columns().first().map(String::as_str), Some(columns::ID));
    assert!(table.columns().iter().any(|c| c == columns::MODIFIED_DATE));
}

#[test]
fn test_empty_customers_table_is_found_empty() {
    let store = ReferenceStore::new();
    store.execute("DELETE FROM Customers;");
    let ops = store.ops();

    assert_eq!(ops.list_all_customers().into_found(), Some(Vec::new()));
    assert!(ops.get_customer_by_id(14).is_not_found());
}

#[test]
fn test_misspelled_column_is_rejected_without_row_processing() {
    let store = ReferenceStore::new();
    let ops = store.ops();
    let mapped = Cell::new(0);

    let outcome = outcome::collect_all(
        ops.executor(),
        "SELECT cust.CustomerIdentifer, cust.CompanyName FROM Customers AS cust",
        &[],
        |row| {
            mapped.set(mapped.get() + 1);
            Customer::from_row(row)
        },
    );

    assert_eq!(outcome.error_kind(), Some(ErrorKind::QueryRejected));
    assert_eq!(mapped.get(), 0);
    assert!(outcome.error().unwrap().message().contains("CustomerIdentifer"));
}

#[test]
fn test_wrongly_typed_company_name_is_a_mapping_failure() {
    let store = ReferenceStore::new();
    // TEXT affinity leaves blobs untouched
    store.execute("UPDATE Customers SET CompanyName = x'01' WHERE CustomerIdentifier = 64;");
    let ops = store.ops();

    let outcome = ops.list_all_customers();
    let info = outcome.error().expect("list should fail");
    assert_eq!(info.kind(), ErrorKind::MappingMismatch);
    assert!(matches!(
        info.mapping_error(),
        Some(MappingError::TypeMismatch { column, .. }) if column == columns::COMPANY_NAME
    ));

    // Other rows are unaffected
    assert!(ops.get_customer_by_id(14).is_found());
    assert_eq!(ops.get_customer_by_id(64).error_kind(), Some(ErrorKind::MappingMismatch));
}

#[test]
fn test_invalid_utf8_company_name_is_a_mapping_failure() {
    let store = ReferenceStore::new();
    store.execute("UPDATE Customers SET CompanyName = CAST(x'ff' AS TEXT) WHERE CustomerIdentifier = 14;");
    let ops = store.ops();

    let outcome = ops.get_customer_by_id(14);
    let info = outcome.error().expect("lookup should fail");
    assert_eq!(info.kind(), ErrorKind::MappingMismatch);
    assert!(matches!(
        info.mapping_error(),
        Some(MappingError::InvalidText { column }) if column == columns::COMPANY_NAME
    ));

    assert_eq!(ops.list_all_customers().error_kind(), Some(ErrorKind::MappingMismatch));
    assert_eq!(ops.customer_table().error_kind(), Some(ErrorKind::MappingMismatch));
    assert!(ops.get_customer_by_id(1).is_found());
}

#[test]
fn test_customer_without_contact_type_is_kept() {
    let store = ReferenceStore::new();
    store.execute("UPDATE Customers SET ContactTypeIdentifier = NULL WHERE CustomerIdentifier = 14;");
    let ops = store.ops();

    let customers = ops.list_all_customers().into_found().unwrap();
    assert_eq!(customers.len(), REFERENCE_CUSTOMER_COUNT);
    let untyped = customers.iter().find(|c| c.id == 14).unwrap();
    assert_eq!(untyped.contact_type_id, None);
    assert_eq!(untyped.contact_title, None);

    let customer = ops.get_customer_by_id(14).into_found().unwrap();
    assert_eq!(customer.company_name, "Consolidated Holdings");
    assert_eq!(customer.contact_title, None);

    let contact = ops.get_contact_by_id(14).into_found().unwrap();
    assert_eq!(contact.contact_name, customer.contact_name);
    assert_eq!(contact.contact_title, None);

    assert_eq!(
        ops.customer_table().into_found().unwrap().row_count(),
        REFERENCE_CUSTOMER_COUNT
    );
}

#[test]
fn test_invalid_timestamp_is_a_mapping_failure() {
    let store = ReferenceStore::new();
    store.execute("UPDATE Customers SET ModifiedDate = 'last tuesday' WHERE CustomerIdentifier = 2;");

    let outcome = store.ops().get_customer_by_id(2);
    assert!(matches!(
        outcome.error().and_then(|e| e.mapping_error()),
        Some(MappingError::InvalidTimestamp { .. })
    ));
}

#[test]
fn test_missing_catalog_is_store_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let ops = DataOperations::new(ConnectionDescriptor::new(dir.path().to_string_lossy(), "Missing"));

    assert_eq!(ops.list_all_customers().error_kind(), Some(ErrorKind::StoreUnavailable));
    assert_eq!(ops.get_customer_by_id(14).error_kind(), Some(ErrorKind::StoreUnavailable));
    assert_eq!(ops.get_contact_by_id(14).error_kind(), Some(ErrorKind::StoreUnavailable));
}

#[test]
fn test_failure_does_not_leak_into_next_call() {
    let store = ReferenceStore::new();
    let ops = store.ops();

    let failed = outcome::collect_all(ops.executor(), "SELECT nope FROM Customers", &[], |row| {
        row.integer("nope")
    });
    assert!(failed.is_failure());

    let next = ops.get_customer_by_id(14);
    assert!(next.is_found());
    assert!(next.error().is_none());
}

#[test]
fn test_concurrent_lookups_are_independent() {
    let store = ReferenceStore::new();
    let ops = store.ops();

    let (first, second) = std::thread::scope(|scope| {
        let a = scope.spawn(|| ops.get_customer_by_id(14));
        let b = scope.spawn(|| ops.get_customer_by_id(14));
        (a.join().unwrap(), b.join().unwrap())
    });

    let first = first.into_found().unwrap();
    let second = second.into_found().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.id, 14);
}

#[test]
fn test_executor_streams_rows_lazily() {
    let store = ReferenceStore::new();
    let ops = store.ops();
    let mut seen = 0;

    ops.executor()
        .execute("SELECT CustomerIdentifier FROM Customers", &[], &mut |_| {
            seen += 1;
            Ok(if seen == 5 { RowFlow::Stop } else { RowFlow::Continue })
        })
        .unwrap();
    assert_eq!(seen, 5);
}
