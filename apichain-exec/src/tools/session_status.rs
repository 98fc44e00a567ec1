use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use apichain_store::{LogKind, SessionStore};

use crate::report::{session_status, StatusQuery};
use crate::tools::{parse_input, Tool, ToolError};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusInput {
    session_id: String,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    kind: Option<LogKind>,
}

pub struct SessionStatusTool {
    store: Arc<SessionStore>,
}

impl SessionStatusTool {
    pub const NAME: &'static str = "api_session_status";

    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SessionStatusTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Show a session's status and its most recent log entries"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "required": ["sessionId"],
            "properties": {
                "sessionId": { "type": "string" },
                "limit": { "type": "integer", "minimum": 0 },
                "kind": { "type": "string", "enum": ["single", "chain-step", "chain-summary"] }
            }
        })
    }

    async fn execute(&self, input: JsonValue) -> Result<JsonValue, ToolError> {
        let input: StatusInput = parse_input(Self::NAME, input)?;
        let query = StatusQuery {
            limit: input.limit,
            kind: input.kind,
        };
        let outcome = session_status(&self.store, &input.session_id, &query).await;
        Ok(serde_json::to_value(outcome)?)
    }
}
