#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use apichain_core::ApiTestRequest;
use apichain_exec::executor::{
    ChainExecutor, ExecutorConfig, HttpClient, HttpError, HttpRequestParts, HttpResponseParts, NoOpEventSink,
    ReqwestHttpClient, DEFAULT_USER_AGENT,
};
use apichain_store::SessionStore;
use async_trait::async_trait;

pub fn request(value: serde_json::Value) -> ApiTestRequest {
    serde_json::from_value(value).expect("valid request")
}

pub fn live_executor() -> (Arc<ChainExecutor>, Arc<SessionStore>) {
    live_executor_with_timeout(Duration::from_secs(5))
}

pub fn live_executor_with_timeout(timeout: Duration) -> (Arc<ChainExecutor>, Arc<SessionStore>) {
    let store = Arc::new(SessionStore::new());
    let http = ReqwestHttpClient::new(DEFAULT_USER_AGENT).unwrap();
    let config = ExecutorConfig {
        timeout,
        ..ExecutorConfig::default()
    };
    let exec = ChainExecutor::new(config, store.clone(), Arc::new(http), Arc::new(NoOpEventSink));
    (Arc::new(exec), store)
}

pub fn scripted_executor(client: Arc<ScriptedHttpClient>) -> (ChainExecutor, Arc<SessionStore>) {
    let store = Arc::new(SessionStore::new());
    let exec = ChainExecutor::new(ExecutorConfig::default(), store.clone(), client, Arc::new(NoOpEventSink));
    (exec, store)
}

/// Replays canned responses in order and records every request it sees.
pub struct ScriptedHttpClient {
    responses: Mutex<Vec<Result<HttpResponseParts, HttpError>>>,
    pub seen: Mutex<Vec<HttpRequestParts>>,
}

impl ScriptedHttpClient {
    pub fn new(mut responses: Vec<Result<HttpResponseParts, HttpError>>) -> Arc<Self> {
        responses.reverse();
        Arc::new(Self {
            responses: Mutex::new(responses),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn urls(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|r| r.url.to_string()).collect()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn send(&self, req: HttpRequestParts, _timeout: Duration) -> Result<HttpResponseParts, HttpError> {
        self.seen.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(HttpError::Other("no scripted response left".to_string())))
    }
}

pub fn json_response(status: u16, body: &str) -> Result<HttpResponseParts, HttpError> {
    Ok(HttpResponseParts {
        status,
        headers: BTreeMap::from([("content-type".to_string(), "application/json".to_string())]),
        body: body.as_bytes().to_vec(),
    })
}

/// Answers every request with `200 {}` after a fixed delay.
pub struct DelayedHttpClient {
    pub delay: Duration,
}

#[async_trait]
impl HttpClient for DelayedHttpClient {
    async fn send(&self, _req: HttpRequestParts, _timeout: Duration) -> Result<HttpResponseParts, HttpError> {
        tokio::time::sleep(self.delay).await;
        json_response(200, "{}")
    }
}

pub fn delayed_executor(delay: Duration) -> (ChainExecutor, Arc<SessionStore>) {
    let store = Arc::new(SessionStore::new());
    let http = Arc::new(DelayedHttpClient { delay });
    let exec = ChainExecutor::new(ExecutorConfig::default(), store.clone(), http, Arc::new(NoOpEventSink));
    (exec, store)
}
