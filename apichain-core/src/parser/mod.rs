use crate::error::ParseError;
use crate::types::ApiTestRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedRequest {
    pub request: ApiTestRequest,
    pub format: DocumentFormat,
}

pub fn parse_request_str(input: &str, format: DocumentFormat) -> Result<ParsedRequest, ParseError> {
    match format {
        DocumentFormat::Json => Ok(ParsedRequest {
            request: serde_json::from_str::<ApiTestRequest>(input)?,
            format,
        }),
        DocumentFormat::Yaml => Ok(ParsedRequest {
            request: serde_yaml::from_str::<ApiTestRequest>(input)?,
            format,
        }),
        DocumentFormat::Auto => parse_request_auto(input),
    }
}

fn parse_request_auto(input: &str) -> Result<ParsedRequest, ParseError> {
    // JSON always starts with `{` after trimming; YAML is a superset so it is the fallback.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') {
        return match serde_json::from_str::<ApiTestRequest>(input) {
            Ok(request) => Ok(ParsedRequest {
                request,
                format: DocumentFormat::Json,
            }),
            Err(e) => match serde_yaml::from_str::<ApiTestRequest>(input) {
                Ok(request) => Ok(ParsedRequest {
                    request,
                    format: DocumentFormat::Yaml,
                }),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str::<ApiTestRequest>(input) {
        Ok(request) => Ok(ParsedRequest {
            request,
            format: DocumentFormat::Yaml,
        }),
        Err(e) => Err(ParseError::Yaml(e)),
    }
}
