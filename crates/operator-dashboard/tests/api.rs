//! End-to-end tests for the dashboard API.
//!
//! Requests go through the full router; `operator-cli` is replaced by a
//! `FakeRunner` except in the `real_process` tests, which spawn ordinary
//! system binaries in its place.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use operator_cli::{CommandOutput, FakeEvent, FakeResponse, FakeRunner};
use operator_dashboard::{create_router, DashboardConfig, DashboardState};
use proptest::prelude::*;
use tower::ServiceExt;

fn app_with(config: DashboardConfig, runner: FakeRunner) -> (Router, Arc<FakeRunner>) {
    let runner = Arc::new(runner);
    let state = Arc::new(DashboardState::with_runner(config, runner.clone()));
    (create_router(state), runner)
}

fn app(runner: FakeRunner) -> (Router, Arc<FakeRunner>) {
    app_with(DashboardConfig::default(), runner)
}

async fn send(app: &Router, method: Method, uri: &str, body: impl Into<Body>) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn update_restarts_only_after_update_finishes() {
    let (app, runner) = app(FakeRunner::new().with_delay("update", Duration::from_millis(50)));

    let response = send(&app, Method::POST, "/api/node/update", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let events = runner.events();
    let update_done = events
        .iter()
        .position(|e| *e == FakeEvent::Finished(args(&["update"])))
        .unwrap();
    let restart_started = events
        .iter()
        .position(|e| *e == FakeEvent::Started(args(&["restart"])))
        .unwrap();
    assert!(update_done < restart_started);
}

#[tokio::test]
async fn failed_update_never_restarts() {
    let (app, runner) = app(
        FakeRunner::new().with_output("update", CommandOutput::failure(3, "checksum mismatch")),
    );

    let response = send(&app, Method::POST, "/api/node/update", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json(response).await;
    assert_eq!(body["error"], "Error occurred while updating");
    assert_eq!(body["detail"], "checksum mismatch");
    assert_eq!(runner.call_count("restart"), 0);
}

#[tokio::test]
async fn hung_command_times_out_as_bad_gateway() {
    let config = DashboardConfig::default().with_command_timeout(Duration::from_millis(50));
    let (app, runner) = app_with(config, FakeRunner::new().with_response("stop", FakeResponse::Hang));

    let response = tokio::time::timeout(
        Duration::from_secs(5),
        send(&app, Method::POST, "/api/node/stop", Body::empty()),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json(response).await;
    assert_eq!(body["error"], "Unable to stop validator");
    assert!(body["detail"].as_str().unwrap().starts_with("timed out"));
    assert!(!runner.events().contains(&FakeEvent::Finished(args(&["stop"]))));
}

#[tokio::test]
async fn spawn_failure_is_bad_gateway() {
    let (app, _) = app(FakeRunner::new().with_response(
        "start",
        FakeResponse::SpawnError("No such file or directory".into()),
    ));

    let response = send(&app, Method::POST, "/api/node/start", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(json(response).await["error"], "Unable to start validator");
}

#[tokio::test]
async fn stderr_with_zero_exit_is_failure() {
    let (app, _) = app(FakeRunner::new().with_output(
        "stake",
        CommandOutput::success("").with_stderr("insufficient balance"),
    ));

    let response = send(&app, Method::POST, "/api/node/stake", r#"{"amount":"10"}"#).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json(response).await;
    assert_eq!(body["error"], "Unable to execute stake");
    assert_eq!(body["detail"], "insufficient balance");
}

#[tokio::test]
async fn inactive_status_keeps_last_active_node_info() {
    let (app, runner) = app(FakeRunner::new().with_stdout(
        "status",
        "state: active\nnodeInfo:\n  publicKey: '0xabc'\n  externalIp: 10.0.0.7\n",
    ));

    let active = json(send(&app, Method::GET, "/api/node/status", Body::empty()).await).await;
    assert_eq!(active["nodeInfo"]["publicKey"], "0xabc");

    runner.set_response(
        "status",
        FakeResponse::Output(CommandOutput::success("state: inactive\nlastActive: yesterday\n")),
    );
    let inactive = json(send(&app, Method::GET, "/api/node/status", Body::empty()).await).await;

    assert_eq!(inactive["state"], "inactive");
    assert_eq!(inactive["lastActive"], "yesterday");
    assert_eq!(inactive["nodeInfo"], active["nodeInfo"]);
}

const WEI_STATUS: &str = "\
state: active
stakeRequirement: 10000000000000000000
lockedStake: 40000000000000000000
nodeInfo:
  publicKey: 7a1c9e
  externalPort: 9001
  stake: 40000000000000000000
";

#[tokio::test]
async fn status_with_wei_amounts_is_reported() {
    let (app, runner) = app(FakeRunner::new().with_stdout("status", WEI_STATUS));

    let response = send(&app, Method::GET, "/api/node/status", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let active = json(response).await;
    assert_eq!(active["lockedStake"].as_f64(), Some(4e19));
    assert_eq!(active["stakeRequirement"].as_f64(), Some(1e19));
    assert_eq!(active["nodeInfo"]["stake"].as_f64(), Some(4e19));
    assert_eq!(active["nodeInfo"]["externalPort"], 9001);

    runner.set_response(
        "status",
        FakeResponse::Output(CommandOutput::success("state: inactive\nlockedStake: 0\n")),
    );
    let inactive = json(send(&app, Method::GET, "/api/node/status", Body::empty()).await).await;

    assert_eq!(inactive["nodeInfo"], active["nodeInfo"]);
}

#[tokio::test]
async fn inactive_status_before_any_active_has_no_node_info() {
    let (app, _) = app(FakeRunner::new().with_stdout("status", "state: inactive\n"));

    let response = send(&app, Method::GET, "/api/node/status", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["state"], "inactive");
    assert!(body.get("nodeInfo").is_none());
}

#[tokio::test]
async fn standby_status_is_not_enriched() {
    let (app, runner) = app(FakeRunner::new().with_stdout(
        "status",
        "state: active\nnodeInfo:\n  publicKey: cached\n",
    ));
    send(&app, Method::GET, "/api/node/status", Body::empty()).await;

    runner.set_response(
        "status",
        FakeResponse::Output(CommandOutput::success("state: standby\n")),
    );
    let body = json(send(&app, Method::GET, "/api/node/status", Body::empty()).await).await;

    assert_eq!(body["state"], "standby");
    assert!(body.get("nodeInfo").is_none());
}

#[tokio::test]
async fn amount_with_nul_byte_is_rejected_before_spawning() {
    let (app, runner) = app(FakeRunner::new());

    let response = send(&app, Method::POST, "/api/node/unstake", r#"{"amount":"1\u0000"}"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(runner.invocations().is_empty());
}

#[tokio::test]
async fn numeric_zero_amount_is_rejected() {
    let (app, runner) = app(FakeRunner::new());

    let response = send(&app, Method::POST, "/api/node/stake", r#"{"amount":0}"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(response).await["error"], "no amount provided");
    assert!(runner.invocations().is_empty());
}

#[tokio::test]
async fn numeric_amount_is_forwarded_as_text() {
    let (app, runner) = app(FakeRunner::new());

    let response = send(&app, Method::POST, "/api/node/stake", r#"{"amount":1500.5}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(runner.invocations(), vec![args(&["stake", "1500.5"])]);
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    let (app, runner) = app(FakeRunner::new()
        .with_delay("start", Duration::from_millis(20))
        .with_output("stop", CommandOutput::failure(1, "busy")));

    let mut handles = Vec::new();
    for i in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let uri = if i % 2 == 0 { "/api/node/start" } else { "/api/node/stop" };
            send(&app, Method::POST, uri, Body::empty()).await.status()
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 4);
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::BAD_GATEWAY).count(),
        4
    );
    assert_eq!(runner.call_count("start"), 4);
    assert_eq!(runner.call_count("stop"), 4);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stake_amount_is_forwarded_verbatim(amount in "[^\\x00]{1,24}") {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let (app, runner) = app(FakeRunner::new());
        let body = serde_json::json!({ "amount": amount }).to_string();

        let status = runtime.block_on(async {
            send(&app, Method::POST, "/api/node/stake", body).await.status()
        });

        prop_assert_eq!(status, StatusCode::OK);
        prop_assert_eq!(runner.invocations(), vec![vec!["stake".to_string(), amount]]);
    }
}

#[cfg(unix)]
mod real_process {
    use super::*;

    fn app_for_program(program: &str) -> Router {
        let config = DashboardConfig::default()
            .with_cli_program(program)
            .with_command_timeout(Duration::from_secs(5));
        create_router(Arc::new(DashboardState::new(config)))
    }

    #[tokio::test]
    async fn successful_exit_is_ok() {
        let app = app_for_program("true");

        let response = send(&app, Method::POST, "/api/node/start", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn non_zero_exit_is_bad_gateway() {
        let app = app_for_program("false");

        let response = send(&app, Method::POST, "/api/node/stop", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json(response).await["detail"], "exited with code 1");
    }

    #[tokio::test]
    async fn missing_program_is_bad_gateway() {
        let app = app_for_program("operator-cli-that-does-not-exist");

        let response = send(&app, Method::GET, "/api/node/version", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json(response).await["error"], "Unable to fetch version");
    }

    #[tokio::test]
    async fn unparseable_status_is_bad_gateway() {
        // `echo status` prints a bare word, not a status document.
        let app = app_for_program("echo");

        let response = send(&app, Method::GET, "/api/node/status", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json(response).await["error"], "Unable to fetch status");
    }
}
