use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use crate::store::types::{LogEntry, Session, SessionStatus, SessionSummary};

#[derive(Clone)]
struct SessionSlot {
    session: Arc<Mutex<Session>>,
    /// Held for a whole invocation, so two runs on one id never interleave their entries.
    invocation: Arc<Mutex<()>>,
}

impl SessionSlot {
    fn new(id: &str) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new(id))),
            invocation: Arc::new(Mutex::new(())),
        }
    }
}

/// Exclusive right to run against one session. Released on drop.
pub type InvocationGuard = OwnedMutexGuard<()>;

/// In-memory map from session id to its append-only log.
///
/// The map lock is only held to find or insert a slot. Each session has its own mutex, so
/// writers to the same id are serialized while different ids proceed independently.
/// Nothing survives a process restart.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionSlot>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the session for `id`, creating it when unknown. Without an id a fresh one is generated.
    pub async fn get_or_create(&self, id: Option<&str>) -> Session {
        let id = match id {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };
        let slot = self.slot_or_insert(&id).await;
        let session = slot.session.lock().await;
        session.clone()
    }

    /// Wait until no other invocation holds `id`, then hold it until the guard drops.
    ///
    /// Creates the session when unknown. Guards for different ids never contend.
    pub async fn lock_session(&self, id: &str) -> InvocationGuard {
        let slot = self.slot_or_insert(id).await;
        slot.invocation.lock_owned().await
    }

    /// Mark a session as running again for a new invocation. Its log is kept.
    pub async fn begin(&self, id: &str) -> Result<(), StoreError> {
        let slot = self.slot(id).await?;
        let mut session = slot.session.lock().await;
        session.status = SessionStatus::Running;
        session.end_time = None;
        session.error = None;
        Ok(())
    }

    /// Append one entry and return the new log length.
    pub async fn append(&self, id: &str, entry: LogEntry) -> Result<usize, StoreError> {
        let slot = self.slot(id).await?;
        let mut session = slot.session.lock().await;
        session.logs.push(entry);
        Ok(session.logs.len())
    }

    pub async fn mark_completed(&self, id: &str) -> Result<(), StoreError> {
        self.finish(id, SessionStatus::Completed, None).await
    }

    pub async fn mark_failed(&self, id: &str, error: impl Into<String>) -> Result<(), StoreError> {
        self.finish(id, SessionStatus::Failed, Some(error.into())).await
    }

    /// Snapshot of a session. Unknown ids are `None`, never an error.
    pub async fn get(&self, id: &str) -> Option<Session> {
        let slot = self.sessions.read().await.get(id).cloned()?;
        let session = slot.session.lock().await;
        Some(session.clone())
    }

    pub async fn clear(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Summaries of every known session, oldest first.
    pub async fn list(&self) -> Vec<SessionSummary> {
        let slots: Vec<SessionSlot> = self.sessions.read().await.values().cloned().collect();
        let mut out = Vec::with_capacity(slots.len());
        for slot in slots {
            out.push(slot.session.lock().await.summary());
        }
        out.sort_by(|a, b| a.start_time.cmp(&b.start_time).then_with(|| a.id.cmp(&b.id)));
        out
    }

    pub async fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    async fn finish(&self, id: &str, status: SessionStatus, error: Option<String>) -> Result<(), StoreError> {
        let slot = self.slot(id).await?;
        let mut session = slot.session.lock().await;
        session.status = status;
        session.error = error;
        session.end_time = Some(Utc::now());
        Ok(())
    }

    async fn slot(&self, id: &str) -> Result<SessionSlot, StoreError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))
    }

    async fn slot_or_insert(&self, id: &str) -> SessionSlot {
        if let Some(slot) = self.sessions.read().await.get(id) {
            return slot.clone();
        }
        let mut map = self.sessions.write().await;
        map.entry(id.to_string())
            .or_insert_with(|| {
                tracing::debug!(session_id = %id, "session created");
                SessionSlot::new(id)
            })
            .clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("session not found: {0}")]
    SessionNotFound(String),
}
