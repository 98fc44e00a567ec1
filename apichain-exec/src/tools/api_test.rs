use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use apichain_core::ApiTestRequest;

use crate::executor::ChainExecutor;
use crate::tools::{parse_input, Tool, ToolError};

pub struct ApiTestTool {
    executor: Arc<ChainExecutor>,
}

impl ApiTestTool {
    pub const NAME: &'static str = "api_test";

    pub fn new(executor: Arc<ChainExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Tool for ApiTestTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Run one HTTP request, or a chain of dependent requests, and validate each response"
    }

    fn input_schema(&self) -> JsonValue {
        let expect = json!({
            "type": "object",
            "properties": {
                "status": { "type": "integer" },
                "contentType": { "type": "string" },
                "body": {},
                "bodyRegex": { "type": "string" }
            }
        });
        json!({
            "type": "object",
            "properties": {
                "sessionId": { "type": "string" },
                "method": { "type": "string", "enum": ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"] },
                "url": { "type": "string" },
                "headers": { "type": "object", "additionalProperties": { "type": "string" } },
                "data": {},
                "expect": expect,
                "chain": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["name", "url"],
                        "properties": {
                            "name": { "type": "string" },
                            "method": { "type": "string" },
                            "url": { "type": "string" },
                            "headers": { "type": "object", "additionalProperties": { "type": "string" } },
                            "data": {},
                            "expect": expect,
                            "extract": { "type": "object", "additionalProperties": { "type": "string" } }
                        }
                    }
                }
            }
        })
    }

    async fn execute(&self, input: JsonValue) -> Result<JsonValue, ToolError> {
        let request: ApiTestRequest = parse_input(Self::NAME, input)?;
        let response = self.executor.run(&request).await?;
        Ok(serde_json::to_value(response)?)
    }
}
