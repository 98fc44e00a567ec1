use std::collections::BTreeMap;

use apichain_core::types::{is_supported_method, HeaderMap, RequestBody};

use crate::executor::http::HttpRequestParts;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("unsupported HTTP method '{0}'")]
    UnsupportedMethod(String),
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// Turn resolved request fields into wire parts.
///
/// An empty text body counts as no body. A body gets `Content-Length` and a default
/// `Content-Type`; `User-Agent` is added when missing (header names compare case-insensitively).
pub fn build_request(
    method: &str,
    url: &str,
    headers: &HeaderMap,
    body: Option<&RequestBody>,
    user_agent: &str,
) -> Result<HttpRequestParts, RequestError> {
    if !is_supported_method(method) {
        return Err(RequestError::UnsupportedMethod(method.to_string()));
    }
    let parsed = url::Url::parse(url).map_err(|e| RequestError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let mut out: BTreeMap<String, String> = headers.clone();
    let body = body.filter(|b| !matches!(b, RequestBody::Text(s) if s.is_empty()));
    let bytes = body.map(RequestBody::to_bytes).unwrap_or_default();

    if let Some(body) = body {
        set_header(&mut out, "Content-Length", bytes.len().to_string());
        if !has_header(&out, "content-type") {
            let default = if body.is_structured() {
                "application/json"
            } else {
                "text/plain"
            };
            out.insert("Content-Type".to_string(), default.to_string());
        }
    }
    if !has_header(&out, "user-agent") {
        out.insert("User-Agent".to_string(), user_agent.to_string());
    }

    Ok(HttpRequestParts {
        method: method.to_ascii_uppercase(),
        url: parsed,
        headers: out,
        body: bytes,
    })
}

fn has_header(headers: &BTreeMap<String, String>, name: &str) -> bool {
    headers.keys().any(|k| k.eq_ignore_ascii_case(name))
}

/// Replace any existing spelling of `name`.
fn set_header(headers: &mut BTreeMap<String, String>, name: &str, value: String) {
    headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_body_defaults_to_json() {
        let body = RequestBody::Structured(json!({"a": 1}));
        let parts = build_request("post", "http://localhost/x", &HeaderMap::new(), Some(&body), "ua/1").unwrap();
        assert_eq!(parts.method, "POST");
        assert_eq!(parts.headers.get("Content-Type").map(String::as_str), Some("application/json"));
        assert_eq!(parts.headers.get("Content-Length").map(String::as_str), Some("7"));
        assert_eq!(parts.body, br#"{"a":1}"#.to_vec());
    }

    #[test]
    fn text_body_defaults_to_plain() {
        let body = RequestBody::Text("hi".to_string());
        let parts = build_request("PUT", "http://localhost/x", &HeaderMap::new(), Some(&body), "ua/1").unwrap();
        assert_eq!(parts.headers.get("Content-Type").map(String::as_str), Some("text/plain"));
    }

    #[test]
    fn caller_content_type_is_kept() {
        let body = RequestBody::Text("a=b".to_string());
        let headers = HeaderMap::from([("content-type".to_string(), "application/x-www-form-urlencoded".to_string())]);
        let parts = build_request("POST", "http://localhost/x", &headers, Some(&body), "ua/1").unwrap();
        assert!(!parts.headers.contains_key("Content-Type"));
        assert_eq!(
            parts.headers.get("content-type").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[test]
    fn no_body_means_no_content_headers() {
        let parts = build_request("GET", "http://localhost/x", &HeaderMap::new(), None, "ua/1").unwrap();
        assert!(parts.body.is_empty());
        assert!(!has_header(&parts.headers, "content-type"));
        assert!(!has_header(&parts.headers, "content-length"));
        assert_eq!(parts.headers.get("User-Agent").map(String::as_str), Some("ua/1"));
    }

    #[test]
    fn empty_text_body_is_no_body() {
        let body = RequestBody::Text(String::new());
        let parts = build_request("POST", "http://localhost/x", &HeaderMap::new(), Some(&body), "ua/1").unwrap();
        assert!(parts.body.is_empty());
        assert!(!has_header(&parts.headers, "content-type"));
        assert!(!has_header(&parts.headers, "content-length"));
    }

    #[test]
    fn rejects_unknown_method_and_bad_url() {
        assert_eq!(
            build_request("TRACE", "http://x", &HeaderMap::new(), None, "ua"),
            Err(RequestError::UnsupportedMethod("TRACE".to_string()))
        );
        assert!(matches!(
            build_request("GET", "/relative", &HeaderMap::new(), None, "ua"),
            Err(RequestError::InvalidUrl { .. })
        ));
    }
}
