use std::collections::BTreeMap;

use apichain_core::types::{BodyValidation, JsonValue, StepResult, ValidationResult};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Running,
    Completed,
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Running => "running",
            SessionStatus::Completed => "completed",
            SessionStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionStatus::Running)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogKind {
    Single,
    ChainStep,
    ChainSummary,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Single => "single",
            LogKind::ChainStep => "chain-step",
            LogKind::ChainSummary => "chain-summary",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single" => Some(LogKind::Single),
            "chain-step" => Some(LogKind::ChainStep),
            "chain-summary" => Some(LogKind::ChainSummary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RequestSnapshot {
    pub method: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSnapshot {
    pub status: u16,
    pub content_type: String,
    pub body: JsonValue,
}

/// One immutable record in a session log.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub kind: LogKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_validation: Option<BodyValidation>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extracted: BTreeMap<String, JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<StepResult>,
}

impl LogEntry {
    pub fn new(kind: LogKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
            step: None,
            request: None,
            response: None,
            validation: None,
            body_validation: None,
            extracted: BTreeMap::new(),
            error: None,
            results: Vec::new(),
        }
    }

    /// Entry for an executed request, with the step's validation outcome.
    pub fn for_result(kind: LogKind, request: RequestSnapshot, result: &StepResult) -> Self {
        Self {
            step: Some(result.name.clone()),
            request: Some(request),
            response: Some(ResponseSnapshot {
                status: result.status,
                content_type: result.content_type.clone(),
                body: result.body.clone(),
            }),
            validation: Some(result.validation),
            body_validation: Some(result.body_validation.clone()),
            extracted: result.extracted.clone(),
            ..Self::new(kind)
        }
    }

    /// Entry for a request that never produced a response.
    pub fn for_failure(kind: LogKind, step: &str, request: Option<RequestSnapshot>, error: impl Into<String>) -> Self {
        Self {
            step: Some(step.to_string()),
            request,
            error: Some(error.into()),
            ..Self::new(kind)
        }
    }

    pub fn summary(results: Vec<StepResult>) -> Self {
        Self {
            results,
            ..Self::new(LogKind::ChainSummary)
        }
    }

    pub fn passed(&self) -> Option<bool> {
        if self.error.is_some() {
            return Some(false);
        }
        match self.kind {
            LogKind::ChainSummary => Some(self.results.iter().all(|r| r.ok)),
            _ => {
                let v = self.validation?;
                let b = self.body_validation.as_ref()?;
                Some(v.status && v.content_type && b.matched)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub logs: Vec<LogEntry>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start_time: Utc::now(),
            end_time: None,
            status: SessionStatus::Running,
            error: None,
            logs: Vec::new(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            status: self.status,
            start_time: self.start_time,
            end_time: self.end_time,
            error: self.error.clone(),
            log_count: self.logs.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub status: SessionStatus,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub log_count: usize,
}
