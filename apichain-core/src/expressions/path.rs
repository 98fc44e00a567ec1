use crate::types::JsonValue;

/// Walk a dot-separated path through nested objects.
///
/// Array indices are not supported: a segment applied to anything but an object is missing.
pub fn lookup_path<'a>(root: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let path = path.trim();
    if path.is_empty() {
        return Some(root);
    }
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn walks_nested_fields() {
        let v = json!({"user": {"profile": {"name": "Ann"}}});
        assert_eq!(lookup_path(&v, "user.profile.name"), Some(&json!("Ann")));
    }

    #[test]
    fn arrays_are_not_indexed() {
        let v = json!({"items": [{"id": 1}]});
        assert_eq!(lookup_path(&v, "items.0.id"), None);
    }

    #[test]
    fn missing_segment_is_none() {
        let v = json!({"a": {}});
        assert_eq!(lookup_path(&v, "a.b.c"), None);
    }
}
