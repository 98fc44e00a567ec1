use async_trait::async_trait;

use apichain_store::SessionStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SessionStarted {
        session_id: String,
        mode: &'static str,
        steps: usize,
    },
    StepStarted {
        session_id: String,
        step: String,
        index: usize,
        method: String,
        url: String,
    },
    StepFinished {
        session_id: String,
        step: String,
        index: usize,
        status: u16,
        passed: bool,
    },
    StepAborted {
        session_id: String,
        step: String,
        index: usize,
        kind: &'static str,
        error: String,
    },
    SessionFinished {
        session_id: String,
        status: SessionStatus,
    },
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

/// Forwards lifecycle events to `tracing`.
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn emit(&self, event: Event) {
        match event {
            Event::SessionStarted { session_id, mode, steps } => {
                tracing::info!(%session_id, mode, steps, "session started");
            }
            Event::StepStarted { session_id, step, index, method, url } => {
                tracing::debug!(%session_id, %step, index, %method, %url, "step started");
            }
            Event::StepFinished { session_id, step, index, status, passed } => {
                tracing::info!(%session_id, %step, index, status, passed, "step finished");
            }
            Event::StepAborted { session_id, step, index, kind, error } => {
                tracing::warn!(%session_id, %step, index, kind, %error, "step aborted");
            }
            Event::SessionFinished { session_id, status } => {
                tracing::info!(%session_id, status = status.as_str(), "session finished");
            }
        }
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}
