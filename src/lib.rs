pub mod engine;
pub mod error;
pub mod status;

pub use error::{EmulatorError, EmulatorResult};
pub use engine::{Executor, SqlArg};
pub use status::{Code, Status};
pub use spanlite_query::{
    unnest_value, Array, BindArg, Data, ErrorKind, Fragment, Params, QueryBuilder, QueryError,
    QueryResult, Scalar, ScalarKind, Statement, Value, ValueType,
};
