mod common;
mod expectation;
mod request;
mod result;

pub use common::{ExtractMap, HeaderMap, JsonValue};
pub use expectation::Expectation;
pub use request::{
    is_supported_method, ApiTestRequest, ChainStep, RequestBody, RequestSpec, SUPPORTED_METHODS,
};
pub use result::{BodyValidation, StepResult, Validation, ValidationResult};
