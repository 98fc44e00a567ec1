mod common;

use std::sync::Arc;
use std::time::Duration;

use apichain_core::ExpectationError;
use apichain_exec::executor::{HttpError, RequestError, StepFailure};
use apichain_store::{LogKind, SessionStatus};
use futures_util::future::join_all;
use serde_json::json;

use common::{delayed_executor, json_response, request, scripted_executor, ScriptedHttpClient};

#[tokio::test]
async fn steps_are_sent_in_declaration_order() {
    let client = ScriptedHttpClient::new(vec![
        json_response(200, r#"{"next":"b"}"#),
        json_response(200, r#"{"next":"c"}"#),
        json_response(200, r#"{}"#),
    ]);
    let (exec, _store) = scripted_executor(client.clone());
    let req = request(json!({
        "chain": [
            { "name": "a", "url": "http://api.test/a", "extract": { "next": "next" } },
            { "name": "b", "url": "http://api.test/{{a.next}}", "extract": { "next": "next" } },
            { "name": "c", "url": "http://api.test/{{b.next}}?from={{a.status}}" }
        ]
    }));
    exec.run(&req).await.unwrap();

    assert_eq!(
        client.urls(),
        vec!["http://api.test/a", "http://api.test/b", "http://api.test/c?from=200"]
    );
}

#[tokio::test]
async fn later_step_names_are_not_visible_earlier() {
    let client = ScriptedHttpClient::new(vec![json_response(200, r#"{"id":7}"#), json_response(200, "{}")]);
    let (exec, _store) = scripted_executor(client.clone());
    let req = request(json!({
        "chain": [
            { "name": "first", "url": "http://api.test/x?peek={{second.id}}" },
            { "name": "second", "url": "http://api.test/y", "extract": { "id": "id" } }
        ]
    }));
    exec.run(&req).await.unwrap();
    assert_eq!(client.urls()[0], "http://api.test/x?peek=");
}

#[tokio::test]
async fn timeout_is_fatal() {
    let client = ScriptedHttpClient::new(vec![Err(HttpError::Timeout { timeout_ms: 30000 })]);
    let (exec, store) = scripted_executor(client.clone());
    let req = request(json!({ "sessionId": "slow", "url": "http://api.test/slow" }));

    let err = exec.run(&req).await.unwrap_err();
    assert_eq!(err.source.kind(), "timeout");
    assert_eq!(err.operation, "single");

    let session = store.get("slow").await.unwrap();
    assert_eq!(session.status, SessionStatus::Failed);
    assert_eq!(session.logs.len(), 1);
    assert_eq!(session.logs[0].kind, LogKind::Single);
}

#[tokio::test]
async fn invalid_regex_aborts_before_sending() {
    let client = ScriptedHttpClient::new(vec![json_response(200, "{}"), json_response(200, "{}")]);
    let (exec, store) = scripted_executor(client.clone());
    let req = request(json!({
        "sessionId": "bad-regex",
        "chain": [
            { "name": "ok", "url": "http://api.test/ok" },
            { "name": "broken", "url": "http://api.test/broken", "expect": { "bodyRegex": "(" } },
            { "name": "skipped", "url": "http://api.test/skipped" }
        ]
    }));
    let err = exec.run(&req).await.unwrap_err();
    assert_eq!(err.step, "broken");
    assert!(matches!(err.source, StepFailure::Expectation(ExpectationError::InvalidRegex { .. })));
    assert_eq!(client.urls(), vec!["http://api.test/ok"]);

    let session = store.get("bad-regex").await.unwrap();
    assert_eq!(session.status, SessionStatus::Failed);
    assert_eq!(session.logs.len(), 2);
    assert!(session.logs[1].error.is_some());
}

#[tokio::test]
async fn unsupported_method_is_a_definition_error() {
    let client = ScriptedHttpClient::new(vec![]);
    let (exec, _store) = scripted_executor(client.clone());
    let req = request(json!({ "method": "TRACE", "url": "http://api.test/" }));
    let err = exec.run(&req).await.unwrap_err();
    assert_eq!(err.source, StepFailure::Request(RequestError::UnsupportedMethod("TRACE".to_string())));
    assert_eq!(err.source.kind(), "definition");
    assert!(client.urls().is_empty());
}

#[tokio::test]
async fn duplicate_step_name_keeps_last_result() {
    let client = ScriptedHttpClient::new(vec![
        json_response(200, r#"{"v":"one"}"#),
        json_response(200, r#"{"v":"two"}"#),
        json_response(200, "{}"),
    ]);
    let (exec, _store) = scripted_executor(client.clone());
    let req = request(json!({
        "chain": [
            { "name": "dup", "url": "http://api.test/1", "extract": { "v": "v" } },
            { "name": "dup", "url": "http://api.test/2", "extract": { "v": "v" } },
            { "name": "use", "url": "http://api.test/{{dup.v}}" }
        ]
    }));
    exec.run(&req).await.unwrap();
    assert_eq!(client.urls()[2], "http://api.test/two");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sessions_keep_separate_logs() {
    let responses = (0..20).map(|_| json_response(200, "{}")).collect();
    let client = ScriptedHttpClient::new(responses);
    let (exec, store) = scripted_executor(client);
    let exec = Arc::new(exec);

    let runs = (0..10).map(|i| {
        let exec = exec.clone();
        async move {
            let req = request(json!({
                "sessionId": format!("s{i}"),
                "chain": [
                    { "name": "one", "url": "http://api.test/1" },
                    { "name": "two", "url": "http://api.test/2" }
                ]
            }));
            exec.run(&req).await
        }
    });
    for r in join_all(runs).await {
        r.unwrap();
    }

    for i in 0..10 {
        let session = store.get(&format!("s{i}")).await.unwrap();
        let kinds: Vec<_> = session.logs.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![LogKind::ChainStep, LogKind::ChainStep, LogKind::ChainSummary]);
    }
}

fn two_step_chain(session_id: &str, prefix: &str) -> apichain_core::ApiTestRequest {
    request(json!({
        "sessionId": session_id,
        "chain": [
            { "name": format!("{prefix}1"), "url": "http://api.test/1" },
            { "name": format!("{prefix}2"), "url": "http://api.test/2" }
        ]
    }))
}

#[tokio::test(start_paused = true)]
async fn runs_sharing_a_session_do_not_interleave() {
    let (exec, store) = delayed_executor(Duration::from_millis(30));
    let a = two_step_chain("shared", "a");
    let b = two_step_chain("shared", "b");

    let (ra, rb) = tokio::join!(exec.run(&a), exec.run(&b));
    ra.unwrap();
    rb.unwrap();

    let session = store.get("shared").await.unwrap();
    let log: Vec<String> = session
        .logs
        .iter()
        .map(|e| format!("{}:{}", e.kind.as_str(), e.step.as_deref().unwrap_or_default()))
        .collect();
    let a_first = ["chain-step:a1", "chain-step:a2", "chain-summary:", "chain-step:b1", "chain-step:b2", "chain-summary:"];
    let b_first = ["chain-step:b1", "chain-step:b2", "chain-summary:", "chain-step:a1", "chain-step:a2", "chain-summary:"];
    assert!(log == a_first || log == b_first, "interleaved: {log:?}");
    assert_eq!(session.status, SessionStatus::Completed);
}

#[tokio::test(start_paused = true)]
async fn runs_on_different_sessions_overlap() {
    let (exec, _store) = delayed_executor(Duration::from_millis(30));
    let a = two_step_chain("left", "a");
    let b = two_step_chain("right", "b");

    let started = tokio::time::Instant::now();
    let (ra, rb) = tokio::join!(exec.run(&a), exec.run(&b));
    ra.unwrap();
    rb.unwrap();
    // Serialized runs would need four delays.
    assert!(started.elapsed() < Duration::from_millis(120), "{:?}", started.elapsed());
}
