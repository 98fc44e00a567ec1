use apichain_core::ExpectationError;
use apichain_store::StoreError;

use crate::executor::http::HttpError;
use crate::executor::request::RequestError;

/// Why a step could not produce a validated response. Always fatal to the invocation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepFailure {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Expectation(#[from] ExpectationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StepFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            StepFailure::Http(HttpError::Timeout { .. }) => "timeout",
            StepFailure::Http(_) => "transport",
            StepFailure::Request(_) | StepFailure::Expectation(_) => "definition",
            StepFailure::Store(_) => "store",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} aborted in session {session_id} at step '{step}': {source}")]
pub struct ExecutionError {
    pub operation: &'static str,
    pub session_id: String,
    pub step: String,
    #[source]
    pub source: StepFailure,
}
