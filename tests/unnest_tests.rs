//! Unnest Tests
//!
//! Runs unnested arrays against the embedded engine:
//! - Row order and native storage classes
//! - Membership tests and derived tables
//! - Error kinds and their status codes
//! - Wire-decoded values end to end

mod common;

use common::{create_seeded_executor, create_test_executor, first_column, select_unnested};
use rusqlite::types::Value as SqlValue;
use serde_json::json;
use spanlite::{
    Array, BindArg, Code, EmulatorError, ErrorKind, QueryBuilder, ScalarKind, Statement, Status,
    Value, ValueType,
};

// ============================================================================
// Row Shape Tests
// ============================================================================

#[test]
fn test_unnest_rows_follow_element_order() {
    let exec = create_test_executor();

    let rows = select_unnested(&exec, &Value::from(vec![3i64, 1, 2]), false);
    assert_eq!(
        first_column(rows),
        vec![
            SqlValue::Integer(3),
            SqlValue::Integer(1),
            SqlValue::Integer(2),
        ]
    );
}

#[test]
fn test_unnest_rows_keep_native_kinds() {
    let exec = create_test_executor();

    let rows = select_unnested(&exec, &Value::from(vec![true, false]), false);
    assert_eq!(
        first_column(rows),
        vec![SqlValue::Integer(1), SqlValue::Integer(0)]
    );

    let rows = select_unnested(&exec, &Value::from(vec![1.1f64, 1.2]), false);
    assert_eq!(
        first_column(rows),
        vec![SqlValue::Real(1.1), SqlValue::Real(1.2)]
    );

    let rows = select_unnested(&exec, &Value::from(vec!["aa", "bb", "cc"]), false);
    assert_eq!(
        first_column(rows),
        vec![
            SqlValue::Text("aa".into()),
            SqlValue::Text("bb".into()),
            SqlValue::Text("cc".into()),
        ]
    );

    let rows = select_unnested(
        &exec,
        &Value::from(vec![b"aa".to_vec(), b"bb".to_vec()]),
        false,
    );
    assert_eq!(
        first_column(rows),
        vec![SqlValue::Blob(b"aa".to_vec()), SqlValue::Blob(b"bb".to_vec())]
    );
}

#[test]
fn test_unnest_empty_array_yields_no_rows() {
    let exec = create_test_executor();
    let rows = select_unnested(&exec, &Value::from(Array::empty(ScalarKind::String)), true);
    assert!(rows.is_empty());
}

#[test]
fn test_unnest_single_element() {
    let exec = create_test_executor();
    let (fragment, args) = QueryBuilder::new()
        .unnest_value(&Value::from(vec!["only"]), false)
        .unwrap();
    assert_eq!(fragment.raw, "VALUES (?)");
    assert_eq!(args, vec![BindArg::Text("only".into())]);

    let rows = select_unnested(&exec, &Value::from(vec!["only"]), false);
    assert_eq!(rows.len(), 1);
}

// ============================================================================
// Membership and Derived Table Tests
// ============================================================================

#[test]
fn test_in_unnest_membership() {
    let exec = create_seeded_executor();
    let builder = QueryBuilder::new();

    let mut stmt = Statement::new();
    stmt.push_sql("SELECT FirstName FROM Singers WHERE ")
        .append(builder.in_unnest("SingerId", &Value::from(vec![3i64, 1, 9])).unwrap())
        .push_sql(" ORDER BY SingerId");

    let rows = exec.query(&stmt).unwrap();
    assert_eq!(
        first_column(rows),
        vec![SqlValue::Text("Marc".into()), SqlValue::Text("Alice".into())]
    );
}

#[test]
fn test_in_unnest_empty_matches_nothing() {
    let exec = create_seeded_executor();
    let builder = QueryBuilder::new();

    let mut stmt = Statement::new();
    stmt.push_sql("SELECT FirstName FROM Singers WHERE ")
        .append(
            builder
                .in_unnest("SingerId", &Value::from(Array::empty(ScalarKind::Int64)))
                .unwrap(),
        );

    assert!(exec.query(&stmt).unwrap().is_empty());
}

#[test]
fn test_in_unnest_after_other_arguments() {
    let exec = create_seeded_executor();
    let builder = QueryBuilder::new();

    let mut stmt = Statement::new();
    stmt.push_sql("SELECT SingerId FROM Singers WHERE Active = ")
        .push_arg(BindArg::Bool(true))
        .push_sql(" AND ")
        .append(
            builder
                .in_unnest("FirstName", &Value::from(vec!["Lea", "Catalina", "Marc"]))
                .unwrap(),
        )
        .push_sql(" ORDER BY SingerId");

    assert_eq!(stmt.placeholder_count(), stmt.args.len());
    let rows = exec.query(&stmt).unwrap();
    assert_eq!(
        first_column(rows),
        vec![SqlValue::Integer(1), SqlValue::Integer(4)]
    );
}

#[test]
fn test_unnest_table_names_column() {
    let exec = create_test_executor();
    let builder = QueryBuilder::new();

    let mut stmt = Statement::new();
    stmt.push_sql("SELECT Name FROM ")
        .append(builder.unnest_table(&Value::from(vec!["x", "y"]), "Name").unwrap());

    let rows = exec.query(&stmt).unwrap();
    assert_eq!(
        first_column(rows),
        vec![SqlValue::Text("x".into()), SqlValue::Text("y".into())]
    );

    let prepared = exec.connection().prepare(&stmt.sql).unwrap();
    assert_eq!(prepared.column_names(), vec!["Name"]);
}

#[test]
fn test_unnest_table_empty() {
    let exec = create_test_executor();
    let builder = QueryBuilder::new();

    let mut stmt = Statement::new();
    stmt.push_sql("SELECT Name FROM ").append(
        builder
            .unnest_table(&Value::from(Array::empty(ScalarKind::Float64)), "Name")
            .unwrap(),
    );

    assert!(exec.query(&stmt).unwrap().is_empty());
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_unnest_null_maps_to_unknown_status() {
    let builder = QueryBuilder::new();
    for allow in [false, true] {
        let err = builder.unnest_value(&Value::null(), allow).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(Status::from(&err).code, Code::Unknown);
    }
}

#[test]
fn test_unnest_scalars_map_to_invalid_argument_status() {
    let builder = QueryBuilder::new();
    let scalars = vec![
        Value::from(true),
        Value::from(100i64),
        Value::from(100f64),
        Value::from("x"),
        Value::from(b"x".to_vec()),
    ];

    for v in scalars {
        for allow in [false, true] {
            let err = builder.unnest_value(&v, allow).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert_eq!(EmulatorError::from(err).to_status().code, Code::InvalidArgument);
        }
    }
}

#[test]
fn test_unnest_empty_rejected_without_tolerance() {
    let err = QueryBuilder::new()
        .unnest_value(&Value::from(Array::empty(ScalarKind::Bool)), false)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

// ============================================================================
// Wire Decoding Tests
// ============================================================================

#[test]
fn test_wire_value_end_to_end() {
    let exec = create_test_executor();
    let ty: ValueType = "ARRAY<INT64>".parse().unwrap();
    let value = Value::from_wire(&json!(["100", "101"]), &ty).unwrap();

    let rows = select_unnested(&exec, &value, false);
    assert_eq!(
        first_column(rows),
        vec![SqlValue::Integer(100), SqlValue::Integer(101)]
    );
}

#[test]
fn test_wire_null_array_is_unknown() {
    let ty: ValueType = "ARRAY<STRING>".parse().unwrap();
    let value = Value::from_wire(&json!(null), &ty).unwrap();

    let err = QueryBuilder::new().unnest_value(&value, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unknown);
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[test]
fn test_shared_builder_across_threads() {
    let builder = QueryBuilder::new();
    let value = Value::from(vec!["aa", "bb", "cc"]);
    let expected = builder.unnest_value(&value, false).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| builder.unnest_value(&value, false).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
