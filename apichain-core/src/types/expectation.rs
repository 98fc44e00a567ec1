use crate::types::JsonValue;

/// Declarative assertions checked against a response.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expectation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Substring that must appear in the response content type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Object for a partial match, string for an exact match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,

    /// Overrides `body` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_regex: Option<String>,
}

impl Expectation {
    pub fn has_body_check(&self) -> bool {
        self.body.is_some() || self.body_regex.is_some()
    }
}
