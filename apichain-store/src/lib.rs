#![forbid(unsafe_code)]

pub mod store;

pub use crate::store::{
    InvocationGuard, LogEntry, LogKind, RequestSnapshot, ResponseSnapshot, Session, SessionStatus,
    SessionStore, SessionSummary, StoreError,
};
