use std::path::Path;

use serde_json::{json, Value as JsonValue};

use apichain_core::{lint_request, parse_request_str, DocumentFormat};
use apichain_exec::report::ReportFormat;
use apichain_exec::ToolError;

use crate::cmd::{build_registry, executor_config};
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat, ReportArg};
use crate::{HttpArgs, OutputArgs};

pub async fn run_cmd(
    path: &Path,
    session_id: Option<&str>,
    report: Option<ReportArg>,
    http: HttpArgs,
    output: OutputArgs,
) -> i32 {
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

    let mut request = match parse_request_str(&content, DocumentFormat::Auto) {
        Ok(p) => p.request,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::VALIDATION_FAILED;
        }
    };
    if let Some(id) = session_id {
        request.set_session_id(id);
    }

    match lint_request(&request) {
        Ok(warnings) => {
            for w in warnings {
                tracing::warn!(path = %w.path, "{}", w.message);
            }
        }
        Err(err) => {
            if output.format == OutputFormat::Text && !output.quiet {
                eprintln!("error: {err}");
                for v in &err.violations {
                    eprintln!("- {v}");
                }
            } else {
                let errors: Vec<String> = err.violations.iter().map(ToString::to_string).collect();
                print_result(output.format, output.quiet, &json!({ "valid": false, "errors": errors }));
            }
            return exit_codes::VALIDATION_FAILED;
        }
    }

    let registry = match build_registry(executor_config(&http)) {
        Ok(r) => r,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let input = match serde_json::to_value(&request) {
        Ok(v) => v,
        Err(e) => {
            print_error(output.format, output.quiet, &format!("failed to encode request: {e}"));
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let (session_id, code) = match registry.call("api_test", input).await {
        Ok(resp) => {
            print_response(&output, &resp);
            let passed = results(&resp).iter().all(|r| r["ok"] == true);
            let id = resp["sessionId"].as_str().unwrap_or_default().to_string();
            (id, if passed { exit_codes::SUCCESS } else { exit_codes::RUN_FAILED })
        }
        Err(ToolError::Execution(e)) => {
            print_error(output.format, output.quiet, &e.to_string());
            (e.session_id, exit_codes::RUN_FAILED)
        }
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    if let Some(format) = report {
        let format = ReportFormat::from(format);
        let input = json!({ "sessionId": session_id, "format": format });
        match registry.call("api_session_report", input).await {
            Ok(out) if !output.quiet => {
                if let Some(content) = out["content"].as_str() {
                    println!("{content}");
                }
            }
            Ok(_) => {}
            Err(e) => print_error(output.format, output.quiet, &e.to_string()),
        }
    }

    code
}

fn results(resp: &JsonValue) -> Vec<&JsonValue> {
    match (resp.get("result"), resp.get("results")) {
        (Some(r), _) => vec![r],
        (None, Some(JsonValue::Array(rs))) => rs.iter().collect(),
        _ => Vec::new(),
    }
}

fn print_response(output: &OutputArgs, resp: &JsonValue) {
    if output.format != OutputFormat::Text || output.quiet {
        print_result(output.format, output.quiet, resp);
        return;
    }
    println!("session {}", resp["sessionId"].as_str().unwrap_or_default());
    for r in results(resp) {
        let mark = if r["ok"] == true { "PASS" } else { "FAIL" };
        println!(
            "{mark} {} {} {}",
            r["name"].as_str().unwrap_or_default(),
            r["status"],
            r["bodyValidation"]["reason"].as_str().unwrap_or_default(),
        );
    }
}
