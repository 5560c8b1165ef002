//! Migration of the local collection after sign-in.

use wheel_local::{MigrationError, MigrationOutcome, OptionInput, ResponseInfo};

use crate::support::{Harness, RecordingTransport};

#[tokio::test]
async fn empty_store_skips_migration() {
    let h = Harness::new();
    let transport = RecordingTransport::status(200);

    assert_eq!(h.bridge.migrate(&transport).await, MigrationOutcome::Skipped);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn successful_migration_clears_local_data() {
    let h = Harness::new();
    let run = h.add(OptionInput::new("Run").weight(5).duration(Some(30)).tags(["fitness"]));
    h.add(OptionInput::new("Read"));
    let transport = RecordingTransport::status(201);

    let outcome = h.bridge.migrate(&transport).await;
    assert_eq!(outcome, MigrationOutcome::Synced { count: 2 });
    assert!(h.bridge.store().get_all().is_empty());
    assert!(h.kv.is_empty());

    let calls = transport.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "/api/sync-local-options");

    let body: serde_json::Value = serde_json::from_str(&calls[0].1).unwrap();
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], run.id.as_str());
    assert_eq!(records[0]["text"], "Run");
    assert_eq!(records[0]["weight"], 5);
    assert_eq!(records[0]["duration"], 30);
    assert_eq!(records[0]["tags"], serde_json::json!(["fitness"]));
    assert!(records[1]["duration"].is_null());
}

#[tokio::test]
async fn rejected_migration_keeps_local_data() {
    let h = Harness::new();
    h.add(OptionInput::new("Run"));
    let transport = RecordingTransport::status(500);

    assert_eq!(
        h.bridge.migrate(&transport).await,
        MigrationOutcome::Rejected { status: 500 }
    );
    assert_eq!(h.texts(), vec!["Run"]);
}

#[tokio::test]
async fn transport_failure_keeps_local_data() {
    let h = Harness::new();
    h.add(OptionInput::new("Run"));
    let transport = RecordingTransport::failing("connection reset");

    assert_eq!(
        h.bridge.migrate(&transport).await,
        MigrationOutcome::Failed(MigrationError::Transport("connection reset".into()))
    );
    assert_eq!(h.texts(), vec!["Run"]);
}

#[tokio::test]
async fn migration_runs_only_when_triggered() {
    let h = Harness::new();
    h.add(OptionInput::new("Run"));
    let transport = RecordingTransport::status(200);

    let failed = ResponseInfo::new(false).trigger(r#"{"syncLocalStorage": true}"#);
    assert_eq!(h.bridge.after_request(&failed, &transport).await, None);

    let silent = ResponseInfo::new(true);
    assert_eq!(h.bridge.after_request(&silent, &transport).await, None);

    let other = ResponseInfo::new(true).trigger(r#"{"showToast": "hi"}"#);
    assert_eq!(h.bridge.after_request(&other, &transport).await, None);

    let disabled = ResponseInfo::new(true).trigger(r#"{"syncLocalStorage": false}"#);
    assert_eq!(h.bridge.after_request(&disabled, &transport).await, None);

    let garbage = ResponseInfo::new(true).trigger("{not json");
    assert_eq!(h.bridge.after_request(&garbage, &transport).await, None);
    assert_eq!(transport.call_count(), 0);

    // the sign-in response arrives once the viewer is authenticated
    h.auth.set(true);
    let signed_in = ResponseInfo::new(true).trigger(r#"{"syncLocalStorage": true}"#);
    assert_eq!(
        h.bridge.after_request(&signed_in, &transport).await,
        Some(MigrationOutcome::Synced { count: 1 })
    );
    assert_eq!(transport.call_count(), 1);
    assert!(h.texts().is_empty());
}
