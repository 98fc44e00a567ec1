use std::collections::BTreeMap;

use crate::types::JsonValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub status: bool,
    pub content_type: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BodyValidation {
    pub matched: bool,
    pub reason: String,
}

impl BodyValidation {
    pub fn matched(reason: impl Into<String>) -> Self {
        Self { matched: true, reason: reason.into() }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self { matched: false, reason: reason.into() }
    }
}

/// Outcome of checking one response against its expectation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub validation: ValidationResult,
    pub body_validation: BodyValidation,
}

impl Validation {
    pub fn passed(&self) -> bool {
        self.validation.status && self.validation.content_type && self.body_validation.matched
    }
}

/// Result of one executed step, returned to the caller and kept in the session log.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub name: String,
    pub ok: bool,
    pub status: u16,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    pub body: JsonValue,
    pub validation: ValidationResult,
    pub body_validation: BodyValidation,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extracted: BTreeMap<String, JsonValue>,
}
