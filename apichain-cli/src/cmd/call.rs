use std::path::Path;

use serde_json::Value as JsonValue;

use apichain_exec::ToolError;

use crate::cmd::{build_registry, executor_config};
use crate::exit_codes;
use crate::output::{print_error, print_result};
use crate::{HttpArgs, OutputArgs};

pub async fn call_cmd(tool: &str, input: Option<&Path>, http: HttpArgs, output: OutputArgs) -> i32 {
    let input: JsonValue = match input {
        None => JsonValue::Object(Default::default()),
        Some(path) => {
            let content = match std::fs::read_to_string(path) {
                Ok(v) => v,
                Err(e) => {
                    print_error(
                        output.format,
                        output.quiet,
                        &format!("failed to read {}: {e}", path.display()),
                    );
                    return exit_codes::RUNTIME_ERROR;
                }
            };
            // YAML is a superset of JSON, so one parser covers both.
            match serde_yaml::from_str(&content) {
                Ok(v) => v,
                Err(e) => {
                    print_error(output.format, output.quiet, &format!("failed to parse input: {e}"));
                    return exit_codes::VALIDATION_FAILED;
                }
            }
        }
    };

    let registry = match build_registry(executor_config(&http)) {
        Ok(r) => r,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    match registry.call(tool, input).await {
        Ok(out) => {
            print_result(output.format, output.quiet, &out);
            exit_codes::SUCCESS
        }
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            match e {
                ToolError::UnknownTool(_) | ToolError::InvalidInput { .. } => exit_codes::VALIDATION_FAILED,
                ToolError::Execution(_) => exit_codes::RUN_FAILED,
                ToolError::Output(_) => exit_codes::RUNTIME_ERROR,
            }
        }
    }
}
