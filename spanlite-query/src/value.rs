//! Protocol value model.
//!
//! A `Value` is either null, a single scalar, or a homogeneous array of
//! scalars. Heterogeneous and nested arrays cannot be constructed.

use std::fmt;
use std::str::FromStr;

use crate::error::{QueryError, QueryResult};

/// Primitive value categories supported by the emulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int64,
    Float64,
    String,
    Bytes,
}

impl ScalarKind {
    /// Protocol type name (`INT64`, `BYTES`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "BOOL",
            ScalarKind::Int64 => "INT64",
            ScalarKind::Float64 => "FLOAT64",
            ScalarKind::String => "STRING",
            ScalarKind::Bytes => "BYTES",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int64(i64),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Int64(_) => ScalarKind::Int64,
            Scalar::Float64(_) => ScalarKind::Float64,
            Scalar::String(_) => ScalarKind::String,
            Scalar::Bytes(_) => ScalarKind::Bytes,
        }
    }
}

/// Ordered, homogeneous sequence of scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    Bool(Vec<bool>),
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    String(Vec<String>),
    Bytes(Vec<Vec<u8>>),
}

impl Array {
    /// Empty array of the given element kind.
    pub fn empty(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => Array::Bool(Vec::new()),
            ScalarKind::Int64 => Array::Int64(Vec::new()),
            ScalarKind::Float64 => Array::Float64(Vec::new()),
            ScalarKind::String => Array::String(Vec::new()),
            ScalarKind::Bytes => Array::Bytes(Vec::new()),
        }
    }

    pub fn element_kind(&self) -> ScalarKind {
        match self {
            Array::Bool(_) => ScalarKind::Bool,
            Array::Int64(_) => ScalarKind::Int64,
            Array::Float64(_) => ScalarKind::Float64,
            Array::String(_) => ScalarKind::String,
            Array::Bytes(_) => ScalarKind::Bytes,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Array::Bool(v) => v.len(),
            Array::Int64(v) => v.len(),
            Array::Float64(v) => v.len(),
            Array::String(v) => v.len(),
            Array::Bytes(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Payload of a protocol datum.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Null,
    Scalar(Scalar),
    Array(Array),
}

/// One protocol datum, as handed over by the decoding layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub data: Data,
}

impl Value {
    pub fn new(data: Data) -> Self {
        Self { data }
    }

    pub fn null() -> Self {
        Self { data: Data::Null }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.data, Data::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self.data, Data::Array(_))
    }

    /// Type of the payload, `None` for null.
    pub fn value_type(&self) -> Option<ValueType> {
        match &self.data {
            Data::Null => None,
            Data::Scalar(s) => Some(ValueType::Scalar(s.kind())),
            Data::Array(a) => Some(ValueType::Array(a.element_kind())),
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::new(Data::Scalar(s))
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::new(Data::Array(a))
    }
}

macro_rules! impl_from_native {
    ($native:ty, $variant:ident) => {
        impl From<$native> for Value {
            fn from(v: $native) -> Self {
                Value::new(Data::Scalar(Scalar::$variant(v)))
            }
        }

        impl From<Vec<$native>> for Value {
            fn from(v: Vec<$native>) -> Self {
                Value::new(Data::Array(Array::$variant(v)))
            }
        }
    };
}

impl_from_native!(bool, Bool);
impl_from_native!(i64, Int64);
impl_from_native!(f64, Float64);
impl_from_native!(String, String);
impl_from_native!(Vec<u8>, Bytes);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::new(Data::Scalar(Scalar::String(v.to_string())))
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::new(Data::Array(Array::String(
            v.into_iter().map(str::to_string).collect(),
        )))
    }
}

/// Declared protocol type of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Scalar(ScalarKind),
    Array(ScalarKind),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Scalar(k) => write!(f, "{}", k),
            ValueType::Array(k) => write!(f, "ARRAY<{}>", k),
        }
    }
}

fn parse_scalar_kind(s: &str) -> Option<ScalarKind> {
    match s.trim().to_ascii_uppercase().as_str() {
        "BOOL" => Some(ScalarKind::Bool),
        "INT64" => Some(ScalarKind::Int64),
        "FLOAT64" => Some(ScalarKind::Float64),
        "STRING" => Some(ScalarKind::String),
        "BYTES" => Some(ScalarKind::Bytes),
        _ => None,
    }
}

impl FromStr for ValueType {
    type Err = QueryError;

    fn from_str(s: &str) -> QueryResult<Self> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();

        if let Some(inner) = upper
            .strip_prefix("ARRAY<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return parse_scalar_kind(inner)
                .map(ValueType::Array)
                .ok_or_else(|| {
                    QueryError::InvalidArgument(format!("unsupported array type: {}", trimmed))
                });
        }

        parse_scalar_kind(&upper)
            .map(ValueType::Scalar)
            .ok_or_else(|| QueryError::InvalidArgument(format!("unsupported type: {}", trimmed)))
    }
}
