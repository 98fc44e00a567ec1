//! Statically enumerated tool registry.
//!
//! Every tool is listed in [`ToolRegistry::builtin`]; nothing is discovered at runtime.

mod api_test;
mod session_report;
mod session_status;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use apichain_store::SessionStore;

use crate::executor::{ChainExecutor, ExecutionError};

pub use api_test::ApiTestTool;
pub use session_report::SessionReportTool;
pub use session_status::SessionStatusTool;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid input for {tool}: {message}")]
    InvalidInput { tool: &'static str, message: String },
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    #[error("failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// JSON Schema of the accepted input.
    fn input_schema(&self) -> JsonValue;
    async fn execute(&self, input: JsonValue) -> Result<JsonValue, ToolError>;
}

pub struct ToolRegistry {
    tools: BTreeMap<&'static str, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn empty() -> Self {
        Self { tools: BTreeMap::new() }
    }

    pub fn builtin(executor: Arc<ChainExecutor>, store: Arc<SessionStore>) -> Self {
        let mut r = Self::empty();
        r.register(Arc::new(ApiTestTool::new(executor)));
        r.register(Arc::new(SessionStatusTool::new(store.clone())));
        r.register(Arc::new(SessionReportTool::new(store)));
        r
    }

    /// Later registrations replace earlier ones with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name(), tool);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.keys().copied().collect()
    }

    pub fn tools(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.values()
    }

    pub async fn call(&self, name: &str, input: JsonValue) -> Result<JsonValue, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tracing::debug!(tool = name, "calling tool");
        tool.execute(input).await
    }
}

pub(crate) fn parse_input<T: serde::de::DeserializeOwned>(tool: &'static str, input: JsonValue) -> Result<T, ToolError> {
    serde_json::from_value(input).map_err(|e| ToolError::InvalidInput {
        tool,
        message: e.to_string(),
    })
}
