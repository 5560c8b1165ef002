//! Migration over HTTP.
//!
//! Starts an axum server standing in for the migration endpoint and drives
//! it with `HttpMigrationClient`.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use wheel_local::bridge::HttpMigrationClient;
use wheel_local::{MigrationOutcome, OptionInput};

use crate::support::Harness;

type Received = Arc<Mutex<Vec<Value>>>;

/// Bind to port 0 and return the base URL.
async fn start_server(status: StatusCode) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route(
            "/api/sync-local-options",
            post(move |State(received): State<Received>, Json(body): Json<Value>| async move {
                received.lock().unwrap().push(body);
                status
            }),
        )
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), received)
}

#[tokio::test]
async fn posts_array_and_clears_on_success() {
    let (base, received) = start_server(StatusCode::OK).await;
    let h = Harness::new();
    h.add(OptionInput::new("Run").weight(5).tags(["fitness"]));
    h.add(OptionInput::new("Read"));

    let client = HttpMigrationClient::new(base);
    let outcome = h.bridge.migrate(&client).await;
    assert_eq!(outcome, MigrationOutcome::Synced { count: 2 });
    assert!(h.bridge.store().get_all().is_empty());

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let records = received[0].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["text"], "Run");
    assert_eq!(records[0]["tags"][0], "fitness");
}

#[tokio::test]
async fn server_error_keeps_local_data() {
    let (base, received) = start_server(StatusCode::INTERNAL_SERVER_ERROR).await;
    let h = Harness::new();
    h.add(OptionInput::new("Run"));

    let client = HttpMigrationClient::new(format!("{base}/"));
    let outcome = h.bridge.migrate(&client).await;
    assert_eq!(outcome, MigrationOutcome::Rejected { status: 500 });
    assert_eq!(received.lock().unwrap().len(), 1);
    assert_eq!(h.texts(), vec!["Run"]);
}

#[tokio::test]
async fn unreachable_server_is_a_failure() {
    let h = Harness::new();
    h.add(OptionInput::new("Run"));

    // port 9 (discard) on localhost is not listening in test environments
    let client = HttpMigrationClient::new("http://127.0.0.1:9");
    let outcome = h.bridge.migrate(&client).await;
    assert!(matches!(outcome, MigrationOutcome::Failed(_)));
    assert_eq!(h.texts(), vec!["Run"]);
}
