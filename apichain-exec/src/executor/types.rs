use std::time::Duration;

use apichain_core::StepResult;

use crate::executor::http::DEFAULT_USER_AGENT;

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Applies to each HTTP request on its own; a chain has no overall deadline.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ApiTestResponse {
    Single {
        #[serde(rename = "sessionId")]
        session_id: String,
        mode: &'static str,
        result: StepResult,
    },
    Chain {
        #[serde(rename = "sessionId")]
        session_id: String,
        mode: &'static str,
        results: Vec<StepResult>,
    },
}

impl ApiTestResponse {
    pub fn session_id(&self) -> &str {
        match self {
            ApiTestResponse::Single { session_id, .. } | ApiTestResponse::Chain { session_id, .. } => session_id,
        }
    }

    pub fn results(&self) -> &[StepResult] {
        match self {
            ApiTestResponse::Single { result, .. } => std::slice::from_ref(result),
            ApiTestResponse::Chain { results, .. } => results,
        }
    }

    /// Every step met its expectation.
    pub fn all_passed(&self) -> bool {
        self.results().iter().all(|r| r.ok)
    }
}
