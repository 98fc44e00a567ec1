use std::sync::Arc;

use apichain_core::types::{ChainStep, RequestBody, RequestSpec};
use apichain_core::{
    extract, resolve, resolve_headers, validate_compiled, ApiTestRequest, CompiledExpectation, StepResult,
    VariableScope,
};
use apichain_store::{InvocationGuard, LogEntry, LogKind, RequestSnapshot, SessionStatus, SessionStore};

use crate::executor::events::{Event, EventSink};
use crate::executor::http::HttpClient;
use crate::executor::request::build_request;
use crate::executor::response::{parse_body, request_snapshot};
use crate::executor::result::{ExecutionError, StepFailure};
use crate::executor::state::{ChainEvent, ChainState};
use crate::executor::types::{ApiTestResponse, ExecutorConfig};

const SINGLE: &str = "single";
const CHAIN: &str = "chain";

/// Runs single requests and chains against a shared [`SessionStore`].
///
/// Steps of one chain run strictly one after another. Expectation mismatches are recorded
/// and the chain continues; transport failures, timeouts and malformed definitions abort it.
/// Invocations on the same session id run one at a time.
pub struct ChainExecutor {
    config: ExecutorConfig,
    store: Arc<SessionStore>,
    http: Arc<dyn HttpClient>,
    events: Arc<dyn EventSink>,
}

impl ChainExecutor {
    pub fn new(
        config: ExecutorConfig,
        store: Arc<SessionStore>,
        http: Arc<dyn HttpClient>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self { config, store, http, events }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub async fn run(&self, request: &ApiTestRequest) -> Result<ApiTestResponse, ExecutionError> {
        match request {
            ApiTestRequest::Chain { session_id, chain } => self.run_chain(session_id.as_deref(), chain).await,
            ApiTestRequest::Single { session_id, request } => self.run_single(session_id.as_deref(), request).await,
        }
    }

    /// One request, empty scope, no extraction.
    pub async fn run_single(
        &self,
        session_id: Option<&str>,
        request: &RequestSpec,
    ) -> Result<ApiTestResponse, ExecutionError> {
        let (session_id, _invocation) = self.open_session(session_id, SINGLE, 1).await;
        let step = ChainStep::from(request.clone());
        let scope = VariableScope::new();

        match self.execute_step(&session_id, LogKind::Single, 0, &step, &scope).await {
            Ok(result) => {
                self.finish(&session_id).await;
                Ok(ApiTestResponse::Single {
                    session_id,
                    mode: SINGLE,
                    result,
                })
            }
            Err(failure) => Err(self.abort(SINGLE, &session_id, 0, &step.name, failure).await),
        }
    }

    pub async fn run_chain(
        &self,
        session_id: Option<&str>,
        steps: &[ChainStep],
    ) -> Result<ApiTestResponse, ExecutionError> {
        let (session_id, _invocation) = self.open_session(session_id, CHAIN, steps.len()).await;
        let mut state = ChainState::NotStarted;
        let mut scope = VariableScope::new();
        let mut results = Vec::with_capacity(steps.len());

        for (index, step) in steps.iter().enumerate() {
            state = transition(&session_id, state, ChainEvent::StepStarted(index));

            let result = match self.execute_step(&session_id, LogKind::ChainStep, index, step, &scope).await {
                Ok(r) => r,
                Err(failure) => {
                    transition(&session_id, state, ChainEvent::Aborted);
                    return Err(self.abort(CHAIN, &session_id, index, &step.name, failure).await);
                }
            };

            // Only now does this step become visible to the ones after it.
            let replaced = scope.absorb_step(&step.name, result.status, &result.content_type, &result.body, &result.extracted);
            if replaced {
                tracing::warn!(%session_id, step = %step.name, "duplicate step name overwrote earlier results in scope");
            }
            results.push(result);
        }

        if let Err(e) = self.store.append(&session_id, LogEntry::summary(results.clone())).await {
            let name = steps.last().map(|s| s.name.as_str()).unwrap_or_default();
            transition(&session_id, state, ChainEvent::Aborted);
            return Err(self.abort(CHAIN, &session_id, steps.len(), name, e.into()).await);
        }
        transition(&session_id, state, ChainEvent::Finished);
        self.finish(&session_id).await;

        Ok(ApiTestResponse::Chain {
            session_id,
            mode: CHAIN,
            results,
        })
    }

    /// The returned guard must live until the session is finished or aborted.
    async fn open_session(
        &self,
        session_id: Option<&str>,
        mode: &'static str,
        steps: usize,
    ) -> (String, InvocationGuard) {
        let session = self.store.get_or_create(session_id).await;
        let guard = self.store.lock_session(&session.id).await;
        // The slot was just created or found, so this only fails if a concurrent clear removed it.
        if let Err(e) = self.store.begin(&session.id).await {
            tracing::warn!(session_id = %session.id, error = %e, "session vanished while starting");
        }
        self.events
            .emit(Event::SessionStarted {
                session_id: session.id.clone(),
                mode,
                steps,
            })
            .await;
        (session.id, guard)
    }

    async fn execute_step(
        &self,
        session_id: &str,
        kind: LogKind,
        index: usize,
        step: &ChainStep,
        scope: &VariableScope,
    ) -> Result<StepResult, StepFailure> {
        let url = resolve(&step.url, scope);
        let headers = resolve_headers(&step.headers, scope);
        // Structured bodies are sent as written, without template resolution.
        let body = step.data.as_ref().map(|d| match d {
            RequestBody::Text(s) => RequestBody::Text(resolve(s, scope)),
            RequestBody::Structured(v) => RequestBody::Structured(v.clone()),
        });
        let snapshot = request_snapshot(&step.method, &url, &headers, body.as_ref());

        self.events
            .emit(Event::StepStarted {
                session_id: session_id.to_string(),
                step: step.name.clone(),
                index,
                method: snapshot.method.clone(),
                url: url.clone(),
            })
            .await;

        let sent = async {
            let expect = step.expect.as_ref().map(CompiledExpectation::new).transpose()?;
            let parts = build_request(&step.method, &url, &headers, body.as_ref(), &self.config.user_agent)?;
            tracing::debug!(%session_id, step = %step.name, method = %parts.method, url = %parts.url, "sending request");
            let resp = self.http.send(parts, self.config.timeout).await?;
            Ok::<_, StepFailure>((expect, resp))
        }
        .await;

        let (expect, resp) = match sent {
            Ok(r) => r,
            Err(failure) => return Err(self.record_failure(session_id, kind, step, snapshot, failure).await),
        };

        let content_type = resp.content_type().to_string();
        let parsed = parse_body(&resp);
        let validation = validate_compiled(resp.status, &content_type, &parsed, expect.as_ref());
        let extracted = extract(&parsed.parsed, &step.extract);

        let result = StepResult {
            name: step.name.clone(),
            ok: validation.passed(),
            status: resp.status,
            content_type,
            headers: resp.headers,
            body: parsed.parsed,
            validation: validation.validation,
            body_validation: validation.body_validation,
            extracted,
        };

        self.store
            .append(session_id, LogEntry::for_result(kind, snapshot, &result))
            .await?;

        self.events
            .emit(Event::StepFinished {
                session_id: session_id.to_string(),
                step: step.name.clone(),
                index,
                status: result.status,
                passed: result.ok,
            })
            .await;

        Ok(result)
    }

    /// Log the failed attempt so the session shows where the run stopped.
    async fn record_failure(
        &self,
        session_id: &str,
        kind: LogKind,
        step: &ChainStep,
        snapshot: RequestSnapshot,
        failure: StepFailure,
    ) -> StepFailure {
        let entry = LogEntry::for_failure(kind, &step.name, Some(snapshot), failure.to_string());
        if let Err(e) = self.store.append(session_id, entry).await {
            tracing::warn!(%session_id, error = %e, "failed to record step failure");
        }
        failure
    }

    async fn abort(
        &self,
        operation: &'static str,
        session_id: &str,
        index: usize,
        step: &str,
        failure: StepFailure,
    ) -> ExecutionError {
        let message = failure.to_string();
        if let Err(e) = self.store.mark_failed(session_id, message.clone()).await {
            tracing::warn!(%session_id, error = %e, "failed to mark session failed");
        }
        self.events
            .emit(Event::StepAborted {
                session_id: session_id.to_string(),
                step: step.to_string(),
                index,
                kind: failure.kind(),
                error: message,
            })
            .await;
        self.events
            .emit(Event::SessionFinished {
                session_id: session_id.to_string(),
                status: SessionStatus::Failed,
            })
            .await;

        ExecutionError {
            operation,
            session_id: session_id.to_string(),
            step: step.to_string(),
            source: failure,
        }
    }

    async fn finish(&self, session_id: &str) {
        if let Err(e) = self.store.mark_completed(session_id).await {
            tracing::warn!(%session_id, error = %e, "failed to mark session completed");
        }
        self.events
            .emit(Event::SessionFinished {
                session_id: session_id.to_string(),
                status: SessionStatus::Completed,
            })
            .await;
    }
}

fn transition(session_id: &str, state: ChainState, event: ChainEvent) -> ChainState {
    match state.next(event) {
        Some(next) => {
            tracing::debug!(%session_id, from = ?state, to = ?next, "chain state");
            next
        }
        None => {
            tracing::error!(%session_id, ?state, ?event, "invalid chain state transition");
            ChainState::Failed
        }
    }
}
