//! Response validation against declarative expectations.
//!
//! Mismatches are data (`matched: false` plus a reason), never errors. The only error is a
//! malformed expectation, such as a `bodyRegex` that does not compile.

mod body;

use regex::Regex;

use crate::error::ExpectationError;
use crate::types::{BodyValidation, Expectation, JsonValue, Validation, ValidationResult};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A response body in both raw and interpreted form.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseBody {
    pub raw: String,
    /// Parsed JSON when the content type is JSON and the text parses; otherwise `raw` as a string.
    pub parsed: JsonValue,
}

impl ResponseBody {
    pub fn from_bytes(bytes: &[u8], content_type: &str) -> Self {
        let raw = String::from_utf8_lossy(bytes).into_owned();
        let parsed = if is_json_content_type(content_type) {
            serde_json::from_str(&raw).unwrap_or_else(|_| JsonValue::String(raw.clone()))
        } else {
            JsonValue::String(raw.clone())
        };
        Self { raw, parsed }
    }
}

pub fn is_json_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains(JSON_CONTENT_TYPE)
}

/// An expectation with its `bodyRegex` compiled, ready to check any number of responses.
#[derive(Debug, Clone)]
pub struct CompiledExpectation<'a> {
    pub expect: &'a Expectation,
    regex: Option<Regex>,
}

impl<'a> CompiledExpectation<'a> {
    pub fn new(expect: &'a Expectation) -> Result<Self, ExpectationError> {
        let regex = expect.body_regex.as_deref().map(body::compile_regex).transpose()?;
        Ok(Self { expect, regex })
    }
}

/// Reject expectations that can never be evaluated.
pub fn check_expectation(expect: &Expectation) -> Result<(), ExpectationError> {
    CompiledExpectation::new(expect).map(|_| ())
}

/// Compile then check. Use [`validate_compiled`] when the expectation was compiled earlier.
pub fn validate_response(
    status: u16,
    content_type: &str,
    body: &ResponseBody,
    expect: Option<&Expectation>,
) -> Result<Validation, ExpectationError> {
    let compiled = expect.map(CompiledExpectation::new).transpose()?;
    Ok(validate_compiled(status, content_type, body, compiled.as_ref()))
}

pub fn validate_compiled(
    status: u16,
    content_type: &str,
    body: &ResponseBody,
    expect: Option<&CompiledExpectation<'_>>,
) -> Validation {
    let Some(compiled) = expect else {
        return Validation {
            validation: ValidationResult { status: true, content_type: true },
            body_validation: BodyValidation::matched(body::NO_EXPECTATION),
        };
    };
    let expect = compiled.expect;

    let validation = ValidationResult {
        status: expect.status.map_or(true, |want| want == status),
        content_type: expect
            .content_type
            .as_deref()
            .map_or(true, |want| content_type.contains(want)),
    };

    let body_validation = match (&compiled.regex, &expect.body) {
        (Some(re), _) => body::check_regex(re, body),
        (None, Some(expected)) => body::check_body(expected, body),
        (None, None) => BodyValidation::matched(body::NO_EXPECTATION),
    };

    Validation { validation, body_validation }
}
