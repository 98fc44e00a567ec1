pub mod call;
pub mod run;
pub mod tools;

use std::sync::Arc;
use std::time::Duration;

use apichain_exec::executor::{
    ChainExecutor, ExecutorConfig, HttpError, ReqwestHttpClient, TracingEventSink, DEFAULT_USER_AGENT,
};
use apichain_exec::ToolRegistry;
use apichain_store::SessionStore;

use crate::HttpArgs;

pub(crate) fn executor_config(http: &HttpArgs) -> ExecutorConfig {
    ExecutorConfig {
        timeout: Duration::from_millis(http.timeout_ms),
        user_agent: http.user_agent.clone().unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
    }
}

/// Wire a fresh in-memory store, the HTTP client and the executor into the builtin registry.
pub(crate) fn build_registry(config: ExecutorConfig) -> Result<ToolRegistry, HttpError> {
    let client = ReqwestHttpClient::new(&config.user_agent)?;
    let store = Arc::new(SessionStore::new());
    let executor = ChainExecutor::new(config, store.clone(), Arc::new(client), Arc::new(TracingEventSink));
    Ok(ToolRegistry::builtin(Arc::new(executor), store))
}
