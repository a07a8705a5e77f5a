//! Embedded engine adapter.
//!
//! Runs assembled statements on SQLite, binding each argument as its
//! native storage class.

use std::path::Path;

use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};
use spanlite_query::{BindArg, Statement};

use crate::error::EmulatorResult;

/// Borrowing wrapper binding a [`BindArg`] to a placeholder.
pub struct SqlArg<'a>(pub &'a BindArg);

impl ToSql for SqlArg<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            BindArg::Bool(b) => ToSqlOutput::from(*b),
            BindArg::Int64(i) => ToSqlOutput::from(*i),
            BindArg::Float64(f) => ToSqlOutput::from(*f),
            BindArg::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            BindArg::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

pub struct Executor {
    conn: Connection,
}

impl Executor {
    pub fn open_in_memory() -> EmulatorResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> EmulatorResult<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run a statement that returns rows, collecting every column.
    pub fn query(&self, stmt: &Statement) -> EmulatorResult<Vec<Vec<SqlValue>>> {
        tracing::debug!(sql = %stmt.sql, args = stmt.args.len(), "query");
        let mut prepared = self.conn.prepare(&stmt.sql)?;
        let column_count = prepared.column_count();

        let rows = prepared.query_map(params_from_iter(stmt.args.iter().map(SqlArg)), |row| {
            (0..column_count)
                .map(|i| row.get::<_, SqlValue>(i))
                .collect::<rusqlite::Result<Vec<_>>>()
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Run a statement without result rows; returns the changed row count.
    pub fn execute(&self, stmt: &Statement) -> EmulatorResult<usize> {
        tracing::debug!(sql = %stmt.sql, args = stmt.args.len(), "execute");
        let changed = self
            .conn
            .execute(&stmt.sql, params_from_iter(stmt.args.iter().map(SqlArg)))?;
        Ok(changed)
    }
}
