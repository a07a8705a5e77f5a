//! Statement assembly: SQL text plus its positional arguments.

use crate::encode::BindArg;
use crate::error::{QueryError, QueryResult};
use crate::unnest::Fragment;

/// A parameterized SQL statement (or statement piece).
///
/// `args[i]` binds the i-th `?` of `sql`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<BindArg>,
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_sql(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append one `?` bound to `arg`.
    pub fn push_arg(&mut self, arg: BindArg) -> &mut Self {
        self.sql.push('?');
        self.args.push(arg);
        self
    }

    /// Append an unnested fragment and its arguments, keeping order.
    pub fn push_fragment(&mut self, fragment: Fragment, args: Vec<BindArg>) -> &mut Self {
        self.sql.push_str(&fragment.raw);
        self.args.extend(args);
        self
    }

    /// Append another statement piece.
    pub fn append(&mut self, other: Statement) -> &mut Self {
        self.sql.push_str(&other.sql);
        self.args.extend(other.args);
        self
    }

    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

/// Back-quote an identifier, doubling embedded back-quotes.
pub fn quote_ident(name: &str) -> QueryResult<String> {
    if name.is_empty() {
        return Err(QueryError::InvalidArgument(
            "identifier must not be empty".to_string(),
        ));
    }
    Ok(format!("`{}`", name.replace('`', "``")))
}
