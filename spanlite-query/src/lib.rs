//! spanlite-query - value-to-SQL translation for the spanlite emulator.
//!
//! The emulator speaks a typed, array-capable protocol but executes
//! statements on an embedded engine that only binds scalar parameters.
//! This crate bridges the two without any engine or RPC dependency.
//!
//! # Main Components
//!
//! - **Value**: tagged protocol datum (null, scalar, or homogeneous array)
//! - **Encoder**: scalar to native bind argument, no coercion
//! - **Unnester**: array to `VALUES (?), (?), ...` plus ordered arguments
//! - **QueryBuilder**: statement assembly on top of the unnester
//!
//! # Example
//!
//! ```rust
//! use spanlite_query::{BindArg, QueryBuilder, Value};
//!
//! let builder = QueryBuilder::new();
//! let (fragment, args) = builder
//!     .unnest_value(&Value::from(vec![100i64, 101]), false)
//!     .unwrap();
//!
//! assert_eq!(fragment.raw, "VALUES (?), (?)");
//! assert_eq!(args, vec![BindArg::Int64(100), BindArg::Int64(101)]);
//! ```

pub mod builder;
pub mod decode;
pub mod encode;
pub mod error;
pub mod statement;
pub mod unnest;
pub mod value;

// Re-export main types for convenience
pub use builder::{Params, QueryBuilder};
pub use encode::BindArg;
pub use error::{ErrorKind, QueryError, QueryResult};
pub use statement::{quote_ident, Statement};
pub use unnest::{unnest_value, Fragment, EMPTY_TABLE};
pub use value::{Array, Data, Scalar, ScalarKind, Value, ValueType};
