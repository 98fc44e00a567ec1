use crate::types::{Expectation, ExtractMap, HeaderMap, JsonValue};

pub const SUPPORTED_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

pub fn is_supported_method(method: &str) -> bool {
    SUPPORTED_METHODS.iter().any(|m| m.eq_ignore_ascii_case(method))
}

/// Request payload. Only the text form goes through template resolution.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum RequestBody {
    Text(String),
    Structured(JsonValue),
}

impl RequestBody {
    pub fn is_structured(&self) -> bool {
        matches!(self, RequestBody::Structured(_))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            RequestBody::Text(s) => s.as_bytes().to_vec(),
            RequestBody::Structured(v) => serde_json::to_vec(v).unwrap_or_default(),
        }
    }
}

/// A single request (single mode).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RequestSpec {
    #[serde(default = "default_method")]
    pub method: String,

    pub url: String,

    #[serde(default, skip_serializing_if = "HeaderMap::is_empty")]
    pub headers: HeaderMap,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RequestBody>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<Expectation>,
}

/// One step of a chain. `name` namespaces the step's results in the scope.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChainStep {
    pub name: String,

    #[serde(default = "default_method")]
    pub method: String,

    pub url: String,

    #[serde(default, skip_serializing_if = "HeaderMap::is_empty")]
    pub headers: HeaderMap,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RequestBody>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<Expectation>,

    #[serde(default, skip_serializing_if = "ExtractMap::is_empty")]
    pub extract: ExtractMap,
}

impl From<RequestSpec> for ChainStep {
    fn from(r: RequestSpec) -> Self {
        Self {
            name: "request".to_string(),
            method: r.method,
            url: r.url,
            headers: r.headers,
            data: r.data,
            expect: r.expect,
            extract: ExtractMap::new(),
        }
    }
}

/// Top-level invocation. The presence of `chain` selects chain mode.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ApiTestRequest {
    Chain {
        #[serde(default, rename = "sessionId", skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
        chain: Vec<ChainStep>,
    },
    Single {
        #[serde(default, rename = "sessionId", skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
        #[serde(flatten)]
        request: RequestSpec,
    },
}

impl ApiTestRequest {
    pub fn session_id(&self) -> Option<&str> {
        match self {
            ApiTestRequest::Chain { session_id, .. } | ApiTestRequest::Single { session_id, .. } => {
                session_id.as_deref()
            }
        }
    }

    pub fn set_session_id(&mut self, id: impl Into<String>) {
        match self {
            ApiTestRequest::Chain { session_id, .. } | ApiTestRequest::Single { session_id, .. } => {
                *session_id = Some(id.into());
            }
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            ApiTestRequest::Chain { .. } => "chain",
            ApiTestRequest::Single { .. } => "single",
        }
    }
}

impl<'de> serde::Deserialize<'de> for ApiTestRequest {
    /// Picks the mode from the `chain` key first, so errors name the offending step and field.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let mut value = <JsonValue as serde::Deserialize>::deserialize(deserializer)?;
        let Some(fields) = value.as_object_mut() else {
            return Err(D::Error::custom("test request must be a mapping"));
        };
        let session_id = match fields.remove("sessionId") {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) => Some(s),
            Some(other) => return Err(D::Error::custom(format!("sessionId must be a string, got {other}"))),
        };

        match fields.remove("chain") {
            Some(JsonValue::Array(items)) => {
                let chain = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| {
                        serde_json::from_value::<ChainStep>(item)
                            .map_err(|e| D::Error::custom(format!("chain[{i}]: {e}")))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ApiTestRequest::Chain { session_id, chain })
            }
            Some(other) => Err(D::Error::custom(format!("chain must be a sequence, got {other}"))),
            None => {
                let request = serde_json::from_value::<RequestSpec>(value).map_err(D::Error::custom)?;
                Ok(ApiTestRequest::Single { session_id, request })
            }
        }
    }
}

fn default_method() -> String {
    "GET".to_string()
}
