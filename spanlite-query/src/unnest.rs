//! Array unnesting.
//!
//! The embedded engine has no array literal, so an array is turned into
//! an ad-hoc derived table: one `VALUES` row and one bound argument per
//! element, in element order.

use std::fmt;

use crate::encode::BindArg;
use crate::error::{QueryError, QueryResult};
use crate::value::{Data, ScalarKind, Value};

/// Zero-row, one-column table used for tolerated empty arrays.
pub const EMPTY_TABLE: &str = "SELECT NULL WHERE 0";

const ROW_PLACEHOLDER: &str = "(?)";
const ROW_SEPARATOR: &str = ", ";

/// SQL text produced for an unnested array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub raw: String,
    /// Kind of the single column the fragment yields.
    pub element: ScalarKind,
}

impl Fragment {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of `?` placeholders in the text.
    pub fn placeholder_count(&self) -> usize {
        self.raw.matches('?').count()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// `VALUES (?), (?), ..., (?)` with `rows` row groups.
fn values_placeholders(rows: usize) -> String {
    let mut raw = String::with_capacity("VALUES ".len() + rows * 5);
    raw.push_str("VALUES ");
    for i in 0..rows {
        if i > 0 {
            raw.push_str(ROW_SEPARATOR);
        }
        raw.push_str(ROW_PLACEHOLDER);
    }
    raw
}

/// Render an array value as a `VALUES` table constructor plus its
/// flattened bind arguments.
///
/// Null data fails with `Unknown` whatever `allow_empty` says; a scalar
/// fails with `InvalidArgument`. An empty array renders [`EMPTY_TABLE`]
/// when `allow_empty` is set and is rejected otherwise.
pub fn unnest_value(v: &Value, allow_empty: bool) -> QueryResult<(Fragment, Vec<BindArg>)> {
    let array = match &v.data {
        Data::Null => {
            return Err(QueryError::Unknown(
                "cannot unnest a value without data".to_string(),
            ))
        }
        Data::Scalar(s) => {
            return Err(QueryError::InvalidArgument(format!(
                "cannot unnest a non-array value of type {}",
                s.kind()
            )))
        }
        Data::Array(a) => a,
    };

    let element = array.element_kind();

    if array.is_empty() {
        if !allow_empty {
            return Err(QueryError::InvalidArgument(format!(
                "cannot unnest an empty ARRAY<{}>",
                element
            )));
        }
        let fragment = Fragment {
            raw: EMPTY_TABLE.to_string(),
            element,
        };
        return Ok((fragment, Vec::new()));
    }

    let mut args = Vec::with_capacity(array.len());
    array.encode_into(&mut args);

    let fragment = Fragment {
        raw: values_placeholders(args.len()),
        element,
    };
    Ok((fragment, args))
}
