use std::collections::BTreeMap;

pub type JsonValue = serde_json::Value;

/// Header map as written in a definition. Values may contain template tokens.
pub type HeaderMap = BTreeMap<String, String>;

/// Variable name -> dot-path into the response body.
pub type ExtractMap = BTreeMap<String, String>;
