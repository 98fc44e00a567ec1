use std::fmt::Write as _;

use apichain_store::{LogKind, Session, SessionStore};

use crate::report::NotFound;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub found: bool,
    pub session_id: String,
    pub format: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ReportOutcome {
    Found(SessionReport),
    NotFound(NotFound),
}

pub async fn session_report(store: &SessionStore, session_id: &str, format: ReportFormat) -> ReportOutcome {
    let Some(session) = store.get(session_id).await else {
        return ReportOutcome::NotFound(NotFound::for_id(store, session_id).await);
    };
    let (format, content) = match format {
        ReportFormat::Markdown => ("markdown", render_markdown(&session)),
        ReportFormat::Json => ("json", serde_json::to_string_pretty(&session).unwrap_or_default()),
    };
    ReportOutcome::Found(SessionReport {
        found: true,
        session_id: session.id,
        format,
        content,
    })
}

pub fn render_markdown(session: &Session) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# API test report: {}", session.id);
    let _ = writeln!(out);
    let _ = writeln!(out, "- Status: {}", session.status.as_str());
    let _ = writeln!(out, "- Started: {}", session.start_time.to_rfc3339());
    if let Some(end) = session.end_time {
        let _ = writeln!(out, "- Finished: {}", end.to_rfc3339());
        let ms = (end - session.start_time).num_milliseconds();
        let _ = writeln!(out, "- Duration: {ms} ms");
    }
    if let Some(err) = &session.error {
        let _ = writeln!(out, "- Error: {err}");
    }

    let entries: Vec<_> = session.logs.iter().filter(|e| e.kind != LogKind::ChainSummary).collect();
    let passed = entries.iter().filter(|e| e.passed() == Some(true)).count();
    let _ = writeln!(out, "- Requests: {} ({} passed, {} failed)", entries.len(), passed, entries.len() - passed);
    let _ = writeln!(out);

    if entries.is_empty() {
        let _ = writeln!(out, "_No requests recorded._");
        return out;
    }

    let _ = writeln!(out, "| # | Kind | Step | Request | Status | Result | Detail |");
    let _ = writeln!(out, "|---|------|------|---------|--------|--------|--------|");
    for (i, e) in entries.iter().enumerate() {
        let request = e
            .request
            .as_ref()
            .map(|r| format!("{} {}", r.method, r.url))
            .unwrap_or_default();
        let status = e.response.as_ref().map(|r| r.status.to_string()).unwrap_or_else(|| "-".to_string());
        let result = match e.passed() {
            Some(true) => "PASS",
            Some(false) => "FAIL",
            None => "-",
        };
        let detail = match (&e.error, &e.body_validation) {
            (Some(err), _) => err.clone(),
            (None, Some(b)) => b.reason.clone(),
            (None, None) => String::new(),
        };
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} |",
            i + 1,
            e.kind.as_str(),
            escape_cell(e.step.as_deref().unwrap_or("")),
            escape_cell(&request),
            status,
            result,
            escape_cell(&detail),
        );
    }
    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
