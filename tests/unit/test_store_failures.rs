//! Backend failure handling: masked reads, propagated writes, and the
//! fallback to degraded mode when connecting fails.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use charette_store::models::Fields;
use charette_store::storage::{
    CollectionPath, Connector, Credentials, Document, DocumentPath, DocumentStore, Query,
    ReadPolicy, StorageError, StorageResult, StoreConfig,
};
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

fn unavailable() -> StorageError {
    StorageError::Backend {
        status: 503,
        message: "backend unavailable".to_string(),
    }
}

/// A backend whose every call fails.
#[derive(Default)]
struct FailingStore {
    calls: AtomicUsize,
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn get(&self, _path: &DocumentPath) -> StorageResult<Option<Document>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(unavailable())
    }

    async fn add(&self, _collection: &CollectionPath, _fields: Fields) -> StorageResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(unavailable())
    }

    async fn update(&self, _path: &DocumentPath, _fields: Fields) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(unavailable())
    }

    async fn query(
        &self,
        _collection: &CollectionPath,
        _query: &Query,
    ) -> StorageResult<Vec<Document>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(unavailable())
    }
}

/// Connects successfully, to a backend that always fails.
struct FailingBackendConnector {
    store: Arc<FailingStore>,
}

#[async_trait]
impl Connector for FailingBackendConnector {
    async fn connect(&self, _credentials: &Credentials) -> StorageResult<Arc<dyn DocumentStore>> {
        Ok(self.store.clone())
    }
}

/// Refuses every connection attempt.
#[derive(Default)]
struct RefusingConnector {
    attempts: AtomicUsize,
}

#[async_trait]
impl Connector for RefusingConnector {
    async fn connect(&self, _credentials: &Credentials) -> StorageResult<Arc<dyn DocumentStore>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::ConnectionError(
            "invalid service account key".to_string(),
        ))
    }
}

async fn failing_store(read_policy: ReadPolicy) -> (CharetteStore, Arc<FailingStore>) {
    let backend = Arc::new(FailingStore::default());
    let connector = Arc::new(FailingBackendConnector {
        store: backend.clone(),
    });
    let store = CharetteStore::new(
        StoreConfig::default()
            .with_credentials(credentials())
            .with_read_policy(read_policy),
        connector,
    );
    assert_eq!(store.initialize().await, StoreMode::Persistent);
    (store, backend)
}

#[tokio::test]
async fn test_lenient_reads_mask_backend_failures() {
    let (store, backend) = failing_store(ReadPolicy::Lenient).await;

    assert!(store.list_charettes().await.unwrap().is_empty());
    assert!(store.get_charette("abc").await.unwrap().is_none());
    assert!(store.get_messages("abc", None).await.unwrap().is_empty());
    assert!(store.get_messages("abc", Some("room-1")).await.unwrap().is_empty());
    assert!(store.get_participants("abc").await.unwrap().is_empty());
    assert!(store.get_analysis("abc").await.unwrap().is_empty());
    assert!(store.get_reports("abc").await.unwrap().is_empty());
    assert!(store.get_latest_report("abc").await.unwrap().is_none());

    assert_eq!(backend.calls.load(Ordering::SeqCst), 8, "every read reached the backend");
}

#[tokio::test]
async fn test_default_read_policy_is_lenient() {
    let store = CharetteStore::degraded();
    assert_eq!(store.read_policy(), ReadPolicy::Lenient);
}

#[tokio::test]
async fn test_strict_reads_propagate_backend_failures() {
    let (store, _backend) = failing_store(ReadPolicy::Strict).await;

    assert_eq!(store.list_charettes().await.unwrap_err(), unavailable());
    assert_eq!(store.get_charette("abc").await.unwrap_err(), unavailable());
    assert_eq!(store.get_messages("abc", None).await.unwrap_err(), unavailable());
    assert_eq!(store.get_participants("abc").await.unwrap_err(), unavailable());
    assert_eq!(store.get_analysis("abc").await.unwrap_err(), unavailable());
    assert_eq!(store.get_reports("abc").await.unwrap_err(), unavailable());
    assert_eq!(store.get_latest_report("abc").await.unwrap_err(), unavailable());
}

#[tokio::test]
async fn test_writes_propagate_backend_failures() {
    let (store, _backend) = failing_store(ReadPolicy::Lenient).await;

    let err = store
        .create_charette(fields(json!({ "title": "Plan" })))
        .await
        .unwrap_err();
    assert_eq!(err, unavailable());

    let err = store
        .update_charette("abc", CharettePatch::new().set("phase", "review"))
        .await
        .unwrap_err();
    assert_eq!(err, unavailable());

    let payload = fields(json!({ "text": "hi" }));
    assert!(store.add_message("abc", payload.clone()).await.is_err());
    assert!(store.add_participant("abc", payload.clone()).await.is_err());
    assert!(store.store_analysis("abc", payload.clone()).await.is_err());
    assert!(store.store_report("abc", payload).await.is_err());
}

#[tokio::test]
async fn test_reserved_patch_is_rejected_before_reaching_backend() {
    let (store, backend) = failing_store(ReadPolicy::Lenient).await;

    let err = store
        .update_charette("abc", CharettePatch::new().set("updatedAt", "now"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::ReservedField { .. }));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_connection_failure_falls_back_to_degraded() {
    let connector = Arc::new(RefusingConnector::default());
    let store = CharetteStore::new(
        StoreConfig::default().with_credentials(credentials()),
        connector.clone(),
    );

    assert_eq!(store.initialize().await, StoreMode::Degraded);
    assert!(!store.is_connected());

    let input = json!({ "title": "Offline" });
    let charette = store.create_charette(fields(input.clone())).await.unwrap();
    assert_eq!(serde_json::to_value(&charette).unwrap(), input);
    assert!(store.list_charettes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_connection_is_not_retried() {
    let connector = Arc::new(RefusingConnector::default());
    let store = CharetteStore::new(
        StoreConfig::default().with_credentials(credentials()),
        connector.clone(),
    );

    assert_eq!(store.initialize().await, StoreMode::Degraded);
    assert_eq!(store.initialize().await, StoreMode::Degraded);
    let (a, b) = tokio::join!(store.initialize(), store.initialize());
    assert_eq!(a, StoreMode::Degraded);
    assert_eq!(b, StoreMode::Degraded);

    assert_eq!(connector.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_strict_reads_from_env() {
    let config = StoreConfig::from_lookup(|key| match key {
        "CHARETTE_STRICT_READS" => Some("true".to_string()),
        _ => None,
    });
    assert_eq!(config.read_policy, ReadPolicy::Strict);
    assert!(config.credentials.is_none());
}
