//! # Response Envelopes
//!
//! The POS backend is not consistent about how it wraps list responses.
//! Depending on the endpoint (and the backend version) a list arrives as:
//!
//! ```text
//! [ {...}, {...} ]                    bare array
//! { "data":  [ {...}, {...} ], ... }  `data` envelope
//! { "items": [ {...}, {...} ], ... }  `items` envelope
//! ```
//!
//! [`decode_list`] tries these shapes in that fixed order. Anything else is
//! an explicit [`EnvelopeError`]; an unknown shape never turns into an empty
//! list.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::EnvelopeError;

/// A recognized list wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// The body is the array itself.
    Bare,
    /// `{ "data": [...] }`
    Data,
    /// `{ "items": [...] }`
    Items,
}

impl EnvelopeShape {
    /// Wrapped shapes in the order they are tried.
    const WRAPPED: [EnvelopeShape; 2] = [EnvelopeShape::Data, EnvelopeShape::Items];

    /// Field holding the list, if this is a wrapped shape.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            EnvelopeShape::Bare => None,
            EnvelopeShape::Data => Some("data"),
            EnvelopeShape::Items => Some("items"),
        }
    }
}

impl fmt::Display for EnvelopeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field() {
            None => write!(f, "bare array"),
            Some(field) => write!(f, "`{}` envelope", field),
        }
    }
}

/// Decodes a list response, whatever known envelope it arrives in.
pub fn decode_list<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, EnvelopeError> {
    decode_list_with_shape(body).map(|(items, _)| items)
}

/// Like [`decode_list`], also reporting which shape matched.
pub fn decode_list_with_shape<T: DeserializeOwned>(
    body: Value,
) -> Result<(Vec<T>, EnvelopeShape), EnvelopeError> {
    let (raw, shape) = unwrap(body)?;

    let items = raw
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| EnvelopeError::InvalidItem {
                shape,
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<T>, _>>()?;

    Ok((items, shape))
}

fn unwrap(body: Value) -> Result<(Vec<Value>, EnvelopeShape), EnvelopeError> {
    match body {
        Value::Array(items) => Ok((items, EnvelopeShape::Bare)),
        Value::Object(mut map) => {
            for shape in EnvelopeShape::WRAPPED {
                let Some(field) = shape.field() else { continue };
                if matches!(map.get(field), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = map.remove(field) {
                        return Ok((items, shape));
                    }
                }
            }
            let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
            keys.sort_unstable();
            Err(EnvelopeError::UnrecognizedShape {
                found: format!("object with keys [{}]", keys.join(", ")),
            })
        }
        other => Err(EnvelopeError::UnrecognizedShape {
            found: describe(&other).to_string(),
        }),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
