use std::collections::BTreeMap;

use apichain_core::types::ExtractMap;
use apichain_core::{extract, resolve, VariableScope};
use serde_json::json;

#[test]
fn extracts_declared_paths() {
    let body = json!({"id": 5, "user": {"email": "a@b.c"}});
    let map = ExtractMap::from([
        ("userId".to_string(), "id".to_string()),
        ("email".to_string(), "user.email".to_string()),
    ]);
    let out = extract(&body, &map);
    assert_eq!(out.get("userId"), Some(&json!(5)));
    assert_eq!(out.get("email"), Some(&json!("a@b.c")));
}

#[test]
fn missing_path_yields_null_not_error() {
    let body = json!({"id": 5});
    let map = ExtractMap::from([("token".to_string(), "auth.token".to_string())]);
    let out = extract(&body, &map);
    assert_eq!(out.get("token"), Some(&json!(null)));
}

#[test]
fn raw_text_body_extracts_nothing() {
    let body = json!("plain text");
    let map = ExtractMap::from([("id".to_string(), "id".to_string())]);
    assert_eq!(extract(&body, &map).get("id"), Some(&json!(null)));
}

#[test]
fn absorb_step_exposes_flat_and_namespaced_forms() {
    let mut scope = VariableScope::new();
    let extracted = BTreeMap::from([("userId".to_string(), json!(101))]);
    let replaced = scope.absorb_step("create", 201, "application/json", &json!({"id": 101}), &extracted);

    assert!(!replaced);
    assert_eq!(resolve("{{userId}}", &scope), "101");
    assert_eq!(resolve("{{create.userId}}", &scope), "101");
    assert_eq!(resolve("{{create.status}}", &scope), "201");
    assert_eq!(resolve("{{create.body.id}}", &scope), "101");
    assert_eq!(resolve("{{create.contentType}}", &scope), "application/json");
}

#[test]
fn duplicate_step_name_overwrites_namespace() {
    let mut scope = VariableScope::new();
    scope.absorb_step("s", 200, "", &json!({"v": 1}), &BTreeMap::new());
    let replaced = scope.absorb_step("s", 404, "", &json!({"v": 2}), &BTreeMap::new());
    assert!(replaced);
    assert_eq!(resolve("{{s.status}}", &scope), "404");
    assert_eq!(resolve("{{s.body.v}}", &scope), "2");
}
