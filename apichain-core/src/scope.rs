use std::collections::BTreeMap;

use serde_json::Map;

use crate::expressions::lookup_path;
use crate::types::JsonValue;

/// Variables visible to template resolution during one chain run.
///
/// Entries are only ever added or overwritten, never removed, so the scope grows
/// forward as steps complete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableScope {
    vars: Map<String, JsonValue>,
}

impl VariableScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.vars.get(name)
    }

    /// Resolve `name.field.field` against the scope.
    pub fn lookup(&self, path: &str) -> Option<&JsonValue> {
        let path = path.trim();
        let (head, tail) = match path.split_once('.') {
            Some((h, t)) => (h, Some(t)),
            None => (path, None),
        };
        let root = self.vars.get(head)?;
        match tail {
            Some(t) => lookup_path(root, t),
            None => Some(root),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: JsonValue) {
        self.vars.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Merge a finished step: each extracted variable as a flat name, plus an object under
    /// the step's own name carrying `body`, `status`, `contentType` and the extracted values.
    ///
    /// Returns `true` when the step name replaced an existing entry.
    pub fn absorb_step(
        &mut self,
        step_name: &str,
        status: u16,
        content_type: &str,
        body: &JsonValue,
        extracted: &BTreeMap<String, JsonValue>,
    ) -> bool {
        for (k, v) in extracted {
            self.vars.insert(k.clone(), v.clone());
        }

        let mut ns = Map::new();
        ns.insert("body".to_string(), body.clone());
        ns.insert("status".to_string(), JsonValue::from(status));
        ns.insert("contentType".to_string(), JsonValue::from(content_type));
        for (k, v) in extracted {
            ns.insert(k.clone(), v.clone());
        }
        self.vars
            .insert(step_name.to_string(), JsonValue::Object(ns))
            .is_some()
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.vars.clone())
    }
}
