use regex::Regex;

use crate::error::ExpectationError;
use crate::types::{BodyValidation, JsonValue};
use crate::validate::ResponseBody;
use crate::value::{deep_equal, describe, to_compact_string};

pub(crate) const NO_EXPECTATION: &str = "No body expectation set.";
pub(crate) const REGEX_MATCHED: &str = "Body matched regex.";
pub(crate) const REGEX_NOT_MATCHED: &str = "Body did not match regex.";
pub(crate) const PARTIAL_MATCHED: &str = "Body partially matched expected fields.";
pub(crate) const ARRAY_MATCHED: &str = "Body matched expected array.";
pub(crate) const ARRAY_NOT_MATCHED: &str = "Body did not match expected array.";
pub(crate) const STRING_MATCHED: &str = "Body exactly matched expected string.";
pub(crate) const STRING_NOT_MATCHED: &str = "Body did not match expected string.";
pub(crate) const TYPE_MISMATCH: &str = "Body type mismatch.";

pub(crate) fn compile_regex(pattern: &str) -> Result<Regex, ExpectationError> {
    Regex::new(pattern).map_err(|e| ExpectationError::InvalidRegex {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

pub(crate) fn check_regex(re: &Regex, body: &ResponseBody) -> BodyValidation {
    let haystack = match &body.parsed {
        JsonValue::String(s) => s.clone(),
        other => to_compact_string(other),
    };
    if re.is_match(&haystack) {
        BodyValidation::matched(REGEX_MATCHED)
    } else {
        BodyValidation::failed(REGEX_NOT_MATCHED)
    }
}

pub(crate) fn check_body(expected: &JsonValue, body: &ResponseBody) -> BodyValidation {
    match (expected, &body.parsed) {
        (JsonValue::Object(want), JsonValue::Object(got)) => {
            for (k, v) in want {
                let Some(actual) = got.get(k) else {
                    return BodyValidation::failed(format!("Missing key '{k}' in response body."));
                };
                if !deep_equal(v, actual) {
                    return BodyValidation::failed(format!(
                        "Value mismatch at key '{k}': expected {}, got {}.",
                        describe(v),
                        describe(actual)
                    ));
                }
            }
            BodyValidation::matched(PARTIAL_MATCHED)
        }
        (JsonValue::Array(_), JsonValue::Array(_)) => {
            if deep_equal(expected, &body.parsed) {
                BodyValidation::matched(ARRAY_MATCHED)
            } else {
                BodyValidation::failed(ARRAY_NOT_MATCHED)
            }
        }
        (JsonValue::String(want), parsed) => {
            let serialized = match parsed {
                JsonValue::String(s) => s.clone(),
                other => to_compact_string(other),
            };
            if *want == body.raw || *want == serialized {
                BodyValidation::matched(STRING_MATCHED)
            } else {
                BodyValidation::failed(STRING_NOT_MATCHED)
            }
        }
        _ => BodyValidation::failed(TYPE_MISMATCH),
    }
}
