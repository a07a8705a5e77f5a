//! Decoding of protocol values from their JSON wire form.
//!
//! INT64 travels as a decimal string, BYTES as standard base64, and
//! FLOAT64 either as a number or as one of `"NaN"`, `"Infinity"`,
//! `"-Infinity"`.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value as JsonValue;

use crate::error::{QueryError, QueryResult};
use crate::value::{Array, Data, Scalar, ScalarKind, Value, ValueType};

fn type_mismatch(kind: ScalarKind, json: &JsonValue) -> QueryError {
    QueryError::InvalidArgument(format!("invalid value {} for type {}", json, kind))
}

fn decode_bool(json: &JsonValue) -> QueryResult<bool> {
    json.as_bool()
        .ok_or_else(|| type_mismatch(ScalarKind::Bool, json))
}

fn decode_int64(json: &JsonValue) -> QueryResult<i64> {
    match json {
        JsonValue::String(s) => s.parse::<i64>().ok(),
        JsonValue::Number(n) => n.as_i64(),
        _ => None,
    }
    .ok_or_else(|| type_mismatch(ScalarKind::Int64, json))
}

fn decode_float64(json: &JsonValue) -> QueryResult<f64> {
    match json {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => match s.as_str() {
            "NaN" => Some(f64::NAN),
            "Infinity" => Some(f64::INFINITY),
            "-Infinity" => Some(f64::NEG_INFINITY),
            _ => None,
        },
        _ => None,
    }
    .ok_or_else(|| type_mismatch(ScalarKind::Float64, json))
}

fn decode_string(json: &JsonValue) -> QueryResult<String> {
    json.as_str()
        .map(str::to_string)
        .ok_or_else(|| type_mismatch(ScalarKind::String, json))
}

fn decode_bytes(json: &JsonValue) -> QueryResult<Vec<u8>> {
    let encoded = json
        .as_str()
        .ok_or_else(|| type_mismatch(ScalarKind::Bytes, json))?;
    BASE64
        .decode(encoded)
        .map_err(|e| QueryError::InvalidArgument(format!("invalid base64 for BYTES: {}", e)))
}

fn decode_scalar(json: &JsonValue, kind: ScalarKind) -> QueryResult<Scalar> {
    Ok(match kind {
        ScalarKind::Bool => Scalar::Bool(decode_bool(json)?),
        ScalarKind::Int64 => Scalar::Int64(decode_int64(json)?),
        ScalarKind::Float64 => Scalar::Float64(decode_float64(json)?),
        ScalarKind::String => Scalar::String(decode_string(json)?),
        ScalarKind::Bytes => Scalar::Bytes(decode_bytes(json)?),
    })
}

/// Decode every element with `f`; array elements are never null.
fn decode_elements<T>(
    items: &[JsonValue],
    kind: ScalarKind,
    f: fn(&JsonValue) -> QueryResult<T>,
) -> QueryResult<Vec<T>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if item.is_null() {
                return Err(QueryError::InvalidArgument(format!(
                    "ARRAY<{}> element {} is null",
                    kind, i
                )));
            }
            f(item)
        })
        .collect()
}

fn decode_array(items: &[JsonValue], kind: ScalarKind) -> QueryResult<Array> {
    Ok(match kind {
        ScalarKind::Bool => Array::Bool(decode_elements(items, kind, decode_bool)?),
        ScalarKind::Int64 => Array::Int64(decode_elements(items, kind, decode_int64)?),
        ScalarKind::Float64 => Array::Float64(decode_elements(items, kind, decode_float64)?),
        ScalarKind::String => Array::String(decode_elements(items, kind, decode_string)?),
        ScalarKind::Bytes => Array::Bytes(decode_elements(items, kind, decode_bytes)?),
    })
}

impl Value {
    /// Build a value from its JSON wire encoding and declared type.
    pub fn from_wire(json: &JsonValue, ty: &ValueType) -> QueryResult<Value> {
        if json.is_null() {
            return Ok(Value::null());
        }

        let data = match ty {
            ValueType::Scalar(kind) => Data::Scalar(decode_scalar(json, *kind)?),
            ValueType::Array(kind) => {
                let items = json.as_array().ok_or_else(|| {
                    QueryError::InvalidArgument(format!("invalid value {} for type {}", json, ty))
                })?;
                Data::Array(decode_array(items, *kind)?)
            }
        };
        Ok(Value::new(data))
    }
}
