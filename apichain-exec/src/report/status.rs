use apichain_store::{LogEntry, LogKind, SessionStore, SessionSummary};

use crate::report::NotFound;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusQuery {
    /// Keep only the most recent `limit` entries (after filtering).
    pub limit: Option<usize>,
    pub kind: Option<LogKind>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusView {
    pub found: bool,
    pub session: SessionSummary,
    pub total_logs: usize,
    pub logs: Vec<LogEntry>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum StatusOutcome {
    Found(SessionStatusView),
    NotFound(NotFound),
}

impl StatusOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, StatusOutcome::Found(_))
    }
}

pub async fn session_status(store: &SessionStore, session_id: &str, query: &StatusQuery) -> StatusOutcome {
    let Some(session) = store.get(session_id).await else {
        return StatusOutcome::NotFound(NotFound::for_id(store, session_id).await);
    };

    let total_logs = session.logs.len();
    let summary = session.summary();
    let mut logs: Vec<LogEntry> = session
        .logs
        .into_iter()
        .filter(|e| query.kind.map_or(true, |k| e.kind == k))
        .collect();
    if let Some(limit) = query.limit {
        let skip = logs.len().saturating_sub(limit);
        logs.drain(..skip);
    }

    StatusOutcome::Found(SessionStatusView {
        found: true,
        session: summary,
        total_logs,
        logs,
    })
}
