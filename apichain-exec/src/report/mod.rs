//! Read-only consumers of the session log.
//!
//! Unknown session ids are a normal outcome here: callers get `found: false` and the ids
//! that do exist.

mod render;
mod status;

pub use render::{render_markdown, session_report, ReportFormat, ReportOutcome, SessionReport};
pub use status::{session_status, SessionStatusView, StatusOutcome, StatusQuery};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFound {
    pub found: bool,
    pub session_id: String,
    pub available_sessions: Vec<String>,
}

impl NotFound {
    pub(crate) async fn for_id(store: &apichain_store::SessionStore, session_id: &str) -> Self {
        Self {
            found: false,
            session_id: session_id.to_string(),
            available_sessions: store.ids().await,
        }
    }
}
