use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use apichain_store::SessionStore;

use crate::report::{session_report, ReportFormat};
use crate::tools::{parse_input, Tool, ToolError};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportInput {
    session_id: String,
    #[serde(default)]
    format: ReportFormat,
}

pub struct SessionReportTool {
    store: Arc<SessionStore>,
}

impl SessionReportTool {
    pub const NAME: &'static str = "api_session_report";

    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SessionReportTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Render the full log of a session as a Markdown or JSON report"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "required": ["sessionId"],
            "properties": {
                "sessionId": { "type": "string" },
                "format": { "type": "string", "enum": ["markdown", "json"] }
            }
        })
    }

    async fn execute(&self, input: JsonValue) -> Result<JsonValue, ToolError> {
        let input: ReportInput = parse_input(Self::NAME, input)?;
        let outcome = session_report(&self.store, &input.session_id, input.format).await;
        Ok(serde_json::to_value(outcome)?)
    }
}
