//! Degraded-mode behaviour of the charette store.
//!
//! Without credentials (or when connecting fails) the store never touches a
//! backend: reads come back empty and writes echo their input.

use serde_json::{Value, json};
use std::sync::Arc;

use charette_store::models::Fields;
use charette_store::storage::{Credentials, MemoryConnector, MemoryDocumentStore, StoreConfig};
use charette_store::{CharettePatch, CharetteStore, StoreMode};

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

fn credentials() -> Credentials {
    Credentials::from_parts(
        Some("charette-test".to_string()),
        Some("unused-key".to_string()),
        Some("svc@charette-test.iam.gserviceaccount.com".to_string()),
    )
    .expect("complete credentials")
}

async fn degraded_store() -> CharetteStore {
    let store = CharetteStore::degraded();
    assert_eq!(store.initialize().await, StoreMode::Degraded);
    store
}

#[tokio::test]
async fn test_missing_credentials_select_degraded_mode() {
    let connector = Arc::new(MemoryConnector::default());
    let store = CharetteStore::new(StoreConfig::default(), connector.clone());

    assert_eq!(store.initialize().await, StoreMode::Degraded);
    assert!(!store.is_connected());
    assert_eq!(connector.attempts(), 0, "no connection without credentials");
}

#[tokio::test]
async fn test_blank_credentials_count_as_missing() {
    let config = StoreConfig::from_lookup(|key| match key {
        "FIREBASE_PROJECT_ID" => Some("charette-test".to_string()),
        "FIREBASE_PRIVATE_KEY" => Some("   ".to_string()),
        "FIREBASE_CLIENT_EMAIL" => Some("svc@example.com".to_string()),
        _ => None,
    });
    let connector = Arc::new(MemoryConnector::default());
    let store = CharetteStore::new(config, connector.clone());

    assert_eq!(store.initialize().await, StoreMode::Degraded);
    assert_eq!(connector.attempts(), 0);
}

#[tokio::test]
async fn test_uninitialized_store_behaves_as_degraded() {
    let connector = Arc::new(MemoryConnector::default());
    let store = CharetteStore::new(
        StoreConfig::default().with_credentials(credentials()),
        connector.clone(),
    );

    assert_eq!(store.mode(), StoreMode::Degraded);
    assert!(store.list_charettes().await.unwrap().is_empty());
    let created = store
        .create_charette(fields(json!({ "title": "Early" })))
        .await
        .unwrap();
    assert!(created.id.is_none());
    assert_eq!(connector.attempts(), 0, "operations never trigger initialization");
}

#[tokio::test]
async fn test_degraded_reads_are_empty() {
    let store = degraded_store().await;

    assert!(store.list_charettes().await.unwrap().is_empty());
    assert!(store.get_charette("abc").await.unwrap().is_none());
    assert!(store.get_messages("abc", None).await.unwrap().is_empty());
    assert!(store.get_messages("abc", Some("room-1")).await.unwrap().is_empty());
    assert!(store.get_participants("abc").await.unwrap().is_empty());
    assert!(store.get_analysis("abc").await.unwrap().is_empty());
    assert!(store.get_reports("abc").await.unwrap().is_empty());
    assert!(store.get_latest_report("abc").await.unwrap().is_none());
}

#[tokio::test]
async fn test_degraded_writes_echo_input_unchanged() {
    let store = degraded_store().await;
    let input = json!({
        "title": "Riverside plan",
        "phase": "ideation",
        "facilitator": { "name": "Ada" },
    });

    let charette = store.create_charette(fields(input.clone())).await.unwrap();
    assert!(charette.id.is_none());
    assert!(charette.created_at.is_none());
    assert!(charette.updated_at.is_none());
    assert_eq!(serde_json::to_value(&charette).unwrap(), input);

    let message_input = json!({ "text": "hello", "roomId": "room-1", "authorId": "u1" });
    let message = store
        .add_message("abc", fields(message_input.clone()))
        .await
        .unwrap();
    assert!(message.id.is_none());
    assert!(message.timestamp.is_none());
    assert_eq!(serde_json::to_value(&message).unwrap(), message_input);

    let participant_input = json!({ "name": "Grace", "role": "stakeholder" });
    let participant = store
        .add_participant("abc", fields(participant_input.clone()))
        .await
        .unwrap();
    assert_eq!(serde_json::to_value(&participant).unwrap(), participant_input);

    let analysis_input = json!({ "themes": ["parking", "trees"], "score": 0.8 });
    let analysis = store
        .store_analysis("abc", fields(analysis_input.clone()))
        .await
        .unwrap();
    assert_eq!(serde_json::to_value(&analysis).unwrap(), analysis_input);

    let report_input = json!({ "summary": "Keep the trees" });
    let report = store
        .store_report("abc", fields(report_input.clone()))
        .await
        .unwrap();
    assert!(report.generated_at.is_none());
    assert_eq!(serde_json::to_value(&report).unwrap(), report_input);
}

#[tokio::test]
async fn test_degraded_echo_keeps_caller_supplied_id() {
    let store = degraded_store().await;
    let input = json!({ "id": "caller-id", "title": "Echo" });

    let charette = store.create_charette(fields(input.clone())).await.unwrap();
    assert_eq!(serde_json::to_value(&charette).unwrap(), input);
}

#[tokio::test]
async fn test_degraded_update_succeeds_without_effect() {
    let store = degraded_store().await;

    store
        .update_charette("missing", CharettePatch::new().set("phase", "review"))
        .await
        .unwrap();
    assert!(store.get_charette("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_degraded_update_ignores_patch_contents() {
    let store = degraded_store().await;

    store
        .update_charette("abc", CharettePatch::new().set("createdAt", "2020-01-01"))
        .await
        .unwrap();
    assert!(store.get_charette("abc").await.unwrap().is_none());
}

#[tokio::test]
async fn test_degraded_mode_is_sticky() {
    let backing = Arc::new(MemoryDocumentStore::new());
    let connector = Arc::new(MemoryConnector::new(backing));
    let store = CharetteStore::new(StoreConfig::default(), connector.clone());

    assert_eq!(store.initialize().await, StoreMode::Degraded);
    assert_eq!(store.initialize().await, StoreMode::Degraded);
    assert_eq!(store.mode(), StoreMode::Degraded);
    assert_eq!(connector.attempts(), 0);
}
