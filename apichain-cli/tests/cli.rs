use assert_cmd::Command;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("tempfile");
    std::io::Write::write_all(&mut f, contents.as_bytes()).expect("write");
    f
}

fn apichain() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("apichain"))
}

fn stdout_json(out: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&out.stdout).expect("json on stdout")
}

#[test]
fn run_single_request_from_yaml() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/users/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":1,"name":"Ann"}"#)
        .create();

    let doc = format!(
        "method: GET\nurl: {}/users/1\nexpect:\n  status: 200\n  body:\n    name: Ann\n",
        server.url()
    );
    let f = write_temp(&doc);

    let out = apichain()
        .args(["run", f.path().to_string_lossy().as_ref(), "--format", "json", "--session-id", "cli-1"])
        .output()
        .unwrap();
    mock.assert();
    assert_eq!(out.status.code(), Some(0));

    let resp = stdout_json(&out);
    assert_eq!(resp["sessionId"], "cli-1");
    assert_eq!(resp["mode"], "single");
    assert_eq!(resp["result"]["ok"], true);
}

#[test]
fn run_chain_with_failed_expectation_exits_3() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/health")
        .with_status(503)
        .create();

    let doc = format!(
        r#"{{"chain":[{{"name":"health","url":"{}/health","expect":{{"status":200}}}}]}}"#,
        server.url()
    );
    let f = write_temp(&doc);

    let out = apichain()
        .args(["run", f.path().to_string_lossy().as_ref()])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(3));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("FAIL health 503"), "{stdout}");
}

#[test]
fn run_unreachable_host_prints_failed_report() {
    let doc = r#"
chain:
  - name: down
    url: http://127.0.0.1:1/
  - name: never
    url: http://127.0.0.1:1/again
"#;
    let f = write_temp(doc);

    let out = apichain()
        .args(["run", f.path().to_string_lossy().as_ref(), "--report", "markdown"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(3));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("- Status: failed"), "{stdout}");
    assert!(stdout.contains("| 1 | chain-step | down |"), "{stdout}");
    assert!(!stdout.contains("never"), "{stdout}");
}

#[test]
fn run_rejects_unparseable_file() {
    let f = write_temp("chain: [unterminated");
    apichain()
        .args(["run", f.path().to_string_lossy().as_ref()])
        .assert()
        .code(2);
}

#[test]
fn run_rejects_definition_that_fails_lint() {
    let f = write_temp(r#"{"chain":[{"name":"bad","url":"http://x/","expect":{"bodyRegex":"("}}]}"#);
    let out = apichain()
        .args(["run", f.path().to_string_lossy().as_ref(), "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    let resp = stdout_json(&out);
    assert_eq!(resp["valid"], false);
}

#[test]
fn tools_lists_builtin_tools() {
    let out = apichain().args(["tools", "--format", "json"]).output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    let tools = stdout_json(&out);
    let names: Vec<&str> = tools
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["api_session_report", "api_session_status", "api_test"]);
}

#[test]
fn call_unknown_tool_exits_2() {
    apichain().args(["call", "nope"]).assert().code(2);
}

#[test]
fn call_status_for_unknown_session_reports_not_found() {
    let f = write_temp("sessionId: ghost\n");
    let out = apichain()
        .args([
            "call",
            "api_session_status",
            "--input",
            f.path().to_string_lossy().as_ref(),
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let resp = stdout_json(&out);
    assert_eq!(resp["found"], false);
    assert_eq!(resp["availableSessions"], serde_json::json!([]));
}
