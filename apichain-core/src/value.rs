//! Structural comparison and rendering of JSON values.

use crate::types::JsonValue;

/// Structural equality. Numbers compare by numeric value, so `1` equals `1.0`.
pub fn deep_equal(a: &JsonValue, b: &JsonValue) -> bool {
    match (a, b) {
        (JsonValue::Null, JsonValue::Null) => true,
        (JsonValue::Bool(x), JsonValue::Bool(y)) => x == y,
        (JsonValue::Number(x), JsonValue::Number(y)) => {
            if x == y {
                return true;
            }
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        (JsonValue::String(x), JsonValue::String(y)) => x == y,
        (JsonValue::Array(x), JsonValue::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| deep_equal(l, r))
        }
        (JsonValue::Object(x), JsonValue::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, v)| y.get(k).is_some_and(|other| deep_equal(v, other)))
        }
        _ => false,
    }
}

/// Text used when a value is spliced into a template. Null renders empty.
pub fn render(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        other => to_compact_string(other),
    }
}

pub fn to_compact_string(value: &JsonValue) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Short human form for diagnostics.
pub fn describe(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => format!("\"{s}\""),
        other => to_compact_string(other),
    }
}
