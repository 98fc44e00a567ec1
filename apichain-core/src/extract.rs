use std::collections::BTreeMap;

use crate::expressions::lookup_path;
use crate::types::{ExtractMap, JsonValue};

/// Pull the declared variables out of a response body.
///
/// Every declared variable is present in the result. A path that does not resolve
/// yields `Null`, which renders as an empty string in later templates.
pub fn extract(body: &JsonValue, map: &ExtractMap) -> BTreeMap<String, JsonValue> {
    map.iter()
        .map(|(var, path)| {
            let value = lookup_path(body, path).cloned().unwrap_or(JsonValue::Null);
            (var.clone(), value)
        })
        .collect()
}
