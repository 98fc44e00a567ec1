use apichain_core::types::{HeaderMap, JsonValue, RequestBody};
use apichain_core::ResponseBody;
use apichain_store::RequestSnapshot;

use crate::executor::http::HttpResponseParts;

/// Interpret the body: JSON only when the content type says so, raw text otherwise.
pub fn parse_body(resp: &HttpResponseParts) -> ResponseBody {
    ResponseBody::from_bytes(&resp.body, resp.content_type())
}

pub fn request_snapshot(
    method: &str,
    url: &str,
    headers: &HeaderMap,
    body: Option<&RequestBody>,
) -> RequestSnapshot {
    RequestSnapshot {
        method: method.to_ascii_uppercase(),
        url: url.to_string(),
        headers: headers.clone(),
        body: body.map(|b| match b {
            RequestBody::Text(s) => JsonValue::String(s.clone()),
            RequestBody::Structured(v) => v.clone(),
        }),
    }
}
