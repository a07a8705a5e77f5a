//! Scalar encoder.
//!
//! Maps each supported scalar kind onto the native bind-argument
//! representation of the embedded engine. Pass-through only; no
//! coercion between kinds and no failure path.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::ser::{Serialize, Serializer};

use crate::value::{Array, Scalar, ScalarKind};

/// Native value bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindArg {
    Bool(bool),
    Int64(i64),
    Float64(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl BindArg {
    pub fn kind(&self) -> ScalarKind {
        match self {
            BindArg::Bool(_) => ScalarKind::Bool,
            BindArg::Int64(_) => ScalarKind::Int64,
            BindArg::Float64(_) => ScalarKind::Float64,
            BindArg::Text(_) => ScalarKind::String,
            BindArg::Blob(_) => ScalarKind::Bytes,
        }
    }
}

impl Scalar {
    pub fn encode(&self) -> BindArg {
        match self {
            Scalar::Bool(b) => BindArg::Bool(*b),
            Scalar::Int64(i) => BindArg::Int64(*i),
            Scalar::Float64(f) => BindArg::Float64(*f),
            Scalar::String(s) => BindArg::Text(s.clone()),
            Scalar::Bytes(b) => BindArg::Blob(b.clone()),
        }
    }
}

impl Array {
    /// Append one argument per element, in element order.
    pub fn encode_into(&self, args: &mut Vec<BindArg>) {
        args.reserve(self.len());
        match self {
            Array::Bool(v) => args.extend(v.iter().copied().map(BindArg::Bool)),
            Array::Int64(v) => args.extend(v.iter().copied().map(BindArg::Int64)),
            Array::Float64(v) => args.extend(v.iter().copied().map(BindArg::Float64)),
            Array::String(v) => args.extend(v.iter().cloned().map(BindArg::Text)),
            Array::Bytes(v) => args.extend(v.iter().cloned().map(BindArg::Blob)),
        }
    }
}

// Blobs are rendered as base64 so diagnostics stay valid JSON text.
impl Serialize for BindArg {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            BindArg::Bool(b) => serializer.serialize_bool(*b),
            BindArg::Int64(i) => serializer.serialize_i64(*i),
            BindArg::Float64(f) => serializer.serialize_f64(*f),
            BindArg::Text(s) => serializer.serialize_str(s),
            BindArg::Blob(b) => serializer.serialize_str(&BASE64.encode(b)),
        }
    }
}
