//! JSON <-> miniexpr Value conversion utilities

use thiserror::Error;

use crate::value::{Value, Variables};

/// Errors raised while loading variables from JSON.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Variables must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Variable '{name}' holds an unsupported {kind}; only scalars are allowed")]
    Unsupported { name: String, kind: &'static str },
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Convert a scalar serde_json::Value to a Value.
///
/// Numbers that fit `i64` become integers, all others floats. Arrays and
/// objects have no counterpart and yield `None`.
pub fn json_to_value(v: serde_json::Value) -> Option<Value> {
    match v {
        serde_json::Value::Null => Some(Value::Null),
        serde_json::Value::Bool(b) => Some(Value::Boolean(b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Value::Integer(i)),
            None => n.as_f64().map(Value::Float),
        },
        serde_json::Value::String(s) => Some(Value::String(s)),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
    }
}

/// Convert a Value to serde_json::Value. Non-finite floats become `null`.
pub fn value_to_json(v: Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
    }
}

/// Parses a JSON object of scalars into a variable context.
///
/// # Examples
///
/// ```
/// use miniexpr::{Value, convert::variables_from_json};
///
/// let vars = variables_from_json(r#"{"limit": 10, "name": "ada"}"#).unwrap();
/// assert_eq!(vars["limit"], Value::Integer(10));
/// assert_eq!(vars["name"], Value::String("ada".into()));
/// ```
pub fn variables_from_json(json: &str) -> Result<Variables, ConvertError> {
    match serde_json::from_str::<serde_json::Value>(json)? {
        serde_json::Value::Object(obj) => obj
            .into_iter()
            .map(|(name, v)| {
                let kind = json_kind(&v);
                match json_to_value(v) {
                    Some(value) => Ok((name, value)),
                    None => Err(ConvertError::Unsupported { name, kind }),
                }
            })
            .collect(),
        other => Err(ConvertError::NotAnObject(json_kind(&other))),
    }
}
