use serde::Serialize;
use serde_json::Value as JsonValue;

use apichain_exec::ExecutorConfig;

use crate::cmd::build_registry;
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolInfo {
    name: &'static str,
    description: &'static str,
    input_schema: JsonValue,
}

pub async fn tools_cmd(output: OutputArgs) -> i32 {
    let registry = match build_registry(ExecutorConfig::default()) {
        Ok(r) => r,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let tools: Vec<ToolInfo> = registry
        .tools()
        .map(|t| ToolInfo {
            name: t.name(),
            description: t.description(),
            input_schema: t.input_schema(),
        })
        .collect();

    if output.format == OutputFormat::Text && !output.quiet {
        for t in &tools {
            println!("{:<20} {}", t.name, t.description);
        }
    } else {
        print_result(output.format, output.quiet, &tools);
    }
    exit_codes::SUCCESS
}
