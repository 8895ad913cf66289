//! Lenient decoding of numbers that upstream APIs send either as JSON numbers
//! or as strings holding a decimal literal.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoercionError {
    #[error("'{raw}' is not a valid floating-point number: {source}")]
    InvalidNumber {
        raw: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("expected a number or a numeric string, found {0}")]
    UnexpectedType(&'static str),
}

/// Turn a JSON string or JSON number into an `f64`.
///
/// Strings are parsed as-is: no trimming and no locale handling, the decimal
/// separator is always `.`.
pub fn coerce_f64(value: &Value) -> Result<f64, CoercionError> {
    match value {
        Value::String(raw) => raw.parse::<f64>().map_err(|source| CoercionError::InvalidNumber {
            raw: raw.clone(),
            source,
        }),
        Value::Number(n) => n.as_f64().ok_or(CoercionError::UnexpectedType("non-finite number")),
        Value::Null => Err(CoercionError::UnexpectedType("null")),
        Value::Bool(_) => Err(CoercionError::UnexpectedType("boolean")),
        Value::Array(_) => Err(CoercionError::UnexpectedType("array")),
        Value::Object(_) => Err(CoercionError::UnexpectedType("object")),
    }
}

/// Serde adapter for `#[serde(deserialize_with = "deserialize_lenient_f64")]`.
pub fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_f64(&value).map_err(serde::de::Error::custom)
}
