//! Common test utilities for engine-backed tests
//!
//! Provides shared helper functions for:
//! - Creating in-memory and file-backed executors
//! - Seeding a small Singers table
//! - Running an unnested fragment as a derived table

#![allow(dead_code)]

use rusqlite::types::Value as SqlValue;
use spanlite::{Executor, QueryBuilder, Statement, Value};
use tempfile::TempDir;

pub fn create_test_executor() -> Executor {
    Executor::open_in_memory().expect("Failed to open in-memory engine")
}

pub fn create_file_executor() -> (Executor, TempDir) {
    let tmp_dir = TempDir::new().expect("Failed to create temp dir");
    let exec = Executor::open(tmp_dir.path().join("spanlite.db"))
        .expect("Failed to open file-backed engine");
    (exec, tmp_dir)
}

pub fn create_seeded_executor() -> Executor {
    let exec = create_test_executor();
    exec.connection()
        .execute_batch(
            "CREATE TABLE Singers (SingerId INTEGER PRIMARY KEY, FirstName TEXT, Active INTEGER);
             INSERT INTO Singers VALUES (1, 'Marc', 1);
             INSERT INTO Singers VALUES (2, 'Catalina', 0);
             INSERT INTO Singers VALUES (3, 'Alice', 1);
             INSERT INTO Singers VALUES (4, 'Lea', 1);",
        )
        .expect("Failed to seed Singers");
    exec
}

/// `SELECT * FROM (<fragment>)` for the given array value.
pub fn select_unnested(exec: &Executor, value: &Value, allow_empty: bool) -> Vec<Vec<SqlValue>> {
    let (fragment, args) = QueryBuilder::new()
        .unnest_value(value, allow_empty)
        .expect("Failed to unnest value");
    let mut stmt = Statement::new();
    stmt.push_sql("SELECT * FROM (")
        .push_fragment(fragment, args)
        .push_sql(")");
    exec.query(&stmt).expect("Failed to run unnested fragment")
}

/// First column of every row.
pub fn first_column(rows: Vec<Vec<SqlValue>>) -> Vec<SqlValue> {
    rows.into_iter()
        .map(|row| row.into_iter().next().unwrap_or(SqlValue::Null))
        .collect()
}
