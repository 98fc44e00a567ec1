mod linter;

use crate::error::{LintError, Violation};
use crate::types::ApiTestRequest;
use linter::Linter;

pub trait Lint {
    fn lint(&self) -> Result<Vec<Violation>, LintError>;
}

impl Lint for ApiTestRequest {
    fn lint(&self) -> Result<Vec<Violation>, LintError> {
        lint_request(self)
    }
}

/// Check a definition before running it.
///
/// Returns the warnings on success (duplicate step names, shadowed expectations).
pub fn lint_request(req: &ApiTestRequest) -> Result<Vec<Violation>, LintError> {
    let mut l = Linter::new();
    match req {
        ApiTestRequest::Chain { chain, .. } => l.lint_chain(chain),
        ApiTestRequest::Single { request, .. } => l.lint_single(request),
    }
    l.finish()
}
