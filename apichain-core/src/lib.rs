#![forbid(unsafe_code)]

//! Definitions and pure evaluation logic for chained API tests: template resolution,
//! field extraction and response validation. No I/O happens here.

pub mod error;
pub mod expressions;
pub mod extract;
pub mod lint;
pub mod parser;
pub mod scope;
pub mod types;
pub mod validate;
pub mod value;

pub use crate::error::{ApiChainError, ExpectationError, LintError, ParseError, Violation};
pub use crate::expressions::{resolve, resolve_headers};
pub use crate::extract::extract;
pub use crate::lint::{lint_request, Lint};
pub use crate::parser::{parse_request_str, DocumentFormat, ParsedRequest};
pub use crate::scope::VariableScope;
pub use crate::types::{ApiTestRequest, ChainStep, Expectation, RequestBody, RequestSpec, StepResult};
pub use crate::validate::{check_expectation, validate_compiled, validate_response, CompiledExpectation, ResponseBody};
