//! QueryBuilder - entry point used by the statement executor.
//!
//! The builder holds nothing but the immutable named parameters of the
//! statement being assembled, so one instance can be shared freely
//! across threads.

use std::collections::HashMap;

use crate::encode::BindArg;
use crate::error::{QueryError, QueryResult};
use crate::statement::{quote_ident, Statement};
use crate::unnest::{self, Fragment};
use crate::value::{Data, Value};

/// Named statement parameters (`@name` -> value), keyed without the `@`.
pub type Params = HashMap<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    params: Params,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    /// Unnest an array value into `VALUES (?), ...` and its arguments.
    pub fn unnest_value(
        &self,
        v: &Value,
        allow_empty: bool,
    ) -> QueryResult<(Fragment, Vec<BindArg>)> {
        let (fragment, args) = unnest::unnest_value(v, allow_empty)?;
        tracing::debug!(
            element = %fragment.element,
            rows = args.len(),
            "unnested array value"
        );
        Ok((fragment, args))
    }

    /// Look up a named parameter; `name` may carry the leading `@`.
    pub fn param(&self, name: &str) -> QueryResult<&Value> {
        let key = name.strip_prefix('@').unwrap_or(name);
        self.params.get(key).ok_or_else(|| {
            QueryError::InvalidArgument(format!("No parameter found for @{}", key))
        })
    }

    pub fn unnest_param(
        &self,
        name: &str,
        allow_empty: bool,
    ) -> QueryResult<(Fragment, Vec<BindArg>)> {
        let value = self.param(name)?;
        self.unnest_value(value, allow_empty)
    }

    /// `<lhs> IN (VALUES (?), ...)`. An empty array yields an always-false
    /// membership test.
    pub fn in_unnest(&self, lhs_sql: &str, v: &Value) -> QueryResult<Statement> {
        let (fragment, args) = self.unnest_value(v, true)?;
        let mut stmt = Statement::new();
        stmt.push_sql(lhs_sql)
            .push_sql(" IN (")
            .push_fragment(fragment, args)
            .push_sql(")");
        Ok(stmt)
    }

    /// Derived table with one column named `column`, one row per element.
    pub fn unnest_table(&self, v: &Value, column: &str) -> QueryResult<Statement> {
        let column = quote_ident(column)?;
        let (fragment, args) = self.unnest_value(v, true)?;
        // VALUES names its only column `column1`; the empty table has `NULL`.
        let source = if args.is_empty() { "NULL" } else { "column1" };

        let mut stmt = Statement::new();
        stmt.push_sql(&format!("(SELECT {} AS {} FROM (", source, column))
            .push_fragment(fragment, args)
            .push_sql("))");
        Ok(stmt)
    }

    /// Multi-row `INSERT INTO t (a, b) VALUES (?, ?), (?, ?)`.
    ///
    /// Scalar cells are bound, null cells are written as `NULL`.
    pub fn insert_rows(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<Value>],
    ) -> QueryResult<Statement> {
        if columns.is_empty() {
            return Err(QueryError::InvalidArgument(
                "INSERT requires at least one column".to_string(),
            ));
        }
        if rows.is_empty() {
            return Err(QueryError::InvalidArgument(
                "INSERT requires at least one row".to_string(),
            ));
        }

        let quoted = columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<QueryResult<Vec<_>>>()?;

        let mut stmt = Statement::new();
        stmt.push_sql(&format!(
            "INSERT INTO {} ({}) VALUES ",
            quote_ident(table)?,
            quoted.join(", ")
        ));

        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(QueryError::InvalidArgument(format!(
                    "row {} has {} values, expected {}",
                    i,
                    row.len(),
                    columns.len()
                )));
            }
            if i > 0 {
                stmt.push_sql(", ");
            }
            stmt.push_sql("(");
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    stmt.push_sql(", ");
                }
                match &cell.data {
                    Data::Null => {
                        stmt.push_sql("NULL");
                    }
                    Data::Scalar(s) => {
                        stmt.push_arg(s.encode());
                    }
                    Data::Array(_) => {
                        return Err(QueryError::InvalidArgument(format!(
                            "column {} of row {} is an array; arrays cannot be inserted as cells",
                            columns[j], i
                        )))
                    }
                }
            }
            stmt.push_sql(")");
        }

        tracing::debug!(table, rows = rows.len(), args = stmt.args.len(), "built multi-row insert");
        Ok(stmt)
    }
}
