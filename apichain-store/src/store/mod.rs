mod session_store;
mod types;

pub use session_store::{InvocationGuard, SessionStore, StoreError};
pub use types::{
    LogEntry, LogKind, RequestSnapshot, ResponseSnapshot, Session, SessionStatus, SessionSummary,
};
