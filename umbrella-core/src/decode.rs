use serde_json::{Map, Value};

use crate::error::{Result, UmbrellaError};

/// Parses a response body into a JSON object. No schema checks beyond that.
pub fn decode(body: &[u8]) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| UmbrellaError::Decode(format!("malformed JSON: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(UmbrellaError::Decode(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
