//! Charette store facade.
//!
//! The single data-access surface for charettes and their sub-collections.
//! A store is built once at startup, initialized once, and then shared
//! (`Arc<CharetteStore>`) with every consumer.
//!
//! Initialization picks one of two modes and never fails:
//! - persistent: the configured credentials produced a working backend;
//! - degraded: no credentials, or connecting failed. Reads return empty
//!   results and writes echo their input without storing it.
//!
//! Write operations always propagate backend errors. Read operations mask
//! them as empty results under [`ReadPolicy::Lenient`] (the default) and
//! propagate them under [`ReadPolicy::Strict`].

mod analysis;
mod charettes;
mod messages;
mod participants;
mod reports;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

use crate::models::fields::ID;
use crate::models::{ChildRecord, Fields, Timestamp, charette};
use crate::storage::{
    Clock, CollectionPath, Connector, Document, DocumentStore, FirestoreConnector, Query,
    ReadPolicy, StorageResult, StoreConfig, SystemClock,
};

/// Which backend the store ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    Persistent,
    Degraded,
}

enum Backend {
    Persistent(Arc<dyn DocumentStore>),
    Degraded,
}

impl Backend {
    fn mode(&self) -> StoreMode {
        match self {
            Backend::Persistent(_) => StoreMode::Persistent,
            Backend::Degraded => StoreMode::Degraded,
        }
    }
}

pub struct CharetteStore {
    config: StoreConfig,
    connector: Arc<dyn Connector>,
    clock: Arc<dyn Clock>,
    backend: OnceCell<Backend>,
}

impl CharetteStore {
    pub fn new(config: StoreConfig, connector: Arc<dyn Connector>) -> Self {
        Self {
            config,
            connector,
            clock: Arc::new(SystemClock::new()),
            backend: OnceCell::new(),
        }
    }

    /// A store that connects to Firestore (or its emulator) per `config`.
    pub fn from_config(config: StoreConfig) -> Self {
        let connector = Arc::new(FirestoreConnector::from_config(&config));
        Self::new(config, connector)
    }

    /// A store with no credentials; it always settles in degraded mode.
    pub fn degraded() -> Self {
        Self::from_config(StoreConfig::default())
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Select the operating mode. Only the first call does any work;
    /// concurrent first calls share a single connection attempt.
    pub async fn initialize(&self) -> StoreMode {
        self.backend.get_or_init(|| self.connect()).await.mode()
    }

    async fn connect(&self) -> Backend {
        let Some(credentials) = self.config.credentials.as_ref() else {
            info!("No database credentials configured, charette store running in degraded mode");
            return Backend::Degraded;
        };

        match self.connector.connect(credentials).await {
            Ok(store) => {
                info!(
                    project_id = %credentials.project_id,
                    "Charette store running in persistent mode"
                );
                Backend::Persistent(store)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Failed to connect to document store, charette store running in degraded mode"
                );
                Backend::Degraded
            }
        }
    }

    /// Current mode; `Degraded` until [`initialize`](Self::initialize) has run.
    pub fn mode(&self) -> StoreMode {
        self.backend.get().map_or(StoreMode::Degraded, Backend::mode)
    }

    pub fn is_connected(&self) -> bool {
        self.mode() == StoreMode::Persistent
    }

    pub fn read_policy(&self) -> ReadPolicy {
        self.config.read_policy
    }

    fn document_store(&self) -> Option<&Arc<dyn DocumentStore>> {
        match self.backend.get() {
            Some(Backend::Persistent(store)) => Some(store),
            _ => None,
        }
    }

    fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Apply the read policy to a backend read.
    fn settle_read<T>(
        &self,
        operation: &str,
        result: StorageResult<T>,
        empty: impl FnOnce() -> T,
    ) -> StorageResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) if self.config.read_policy == ReadPolicy::Lenient => {
                warn!(operation, error = %e, "Read failed, returning empty result");
                Ok(empty())
            }
            Err(e) => Err(e),
        }
    }

    async fn insert_child<R: ChildRecord>(
        &self,
        charette_id: &str,
        mut fields: Fields,
    ) -> StorageResult<R> {
        let Some(store) = self.document_store() else {
            debug!(
                charette_id,
                collection = R::COLLECTION,
                "Degraded mode, record not persisted"
            );
            return Ok(R::unsaved(fields));
        };

        fields.remove(ID);
        fields.insert(R::STAMP_FIELD.to_string(), self.now().into());

        let collection = child_collection::<R>(charette_id);
        let id = store
            .add(&collection, fields.clone())
            .await
            .inspect_err(|e| error!(collection = %collection, error = %e, "Failed to add record"))?;
        debug!(collection = %collection, id = %id, "Record added");

        Ok(R::from_document(Document::new(id, fields)))
    }

    async fn query_children<R: ChildRecord>(
        &self,
        charette_id: &str,
        query: Query,
    ) -> StorageResult<Vec<R>> {
        let Some(store) = self.document_store() else {
            return Ok(Vec::new());
        };

        let collection = child_collection::<R>(charette_id);
        let result = store
            .query(&collection, &query)
            .await
            .map(|documents| documents.into_iter().map(R::from_document).collect());
        self.settle_read(R::COLLECTION, result, Vec::new)
    }
}

fn charettes() -> CollectionPath {
    CollectionPath::root(charette::COLLECTION)
}

/// `charettes/{charette_id}/{collection}`; the parent is not checked for existence.
fn child_collection<R: ChildRecord>(charette_id: &str) -> CollectionPath {
    charettes().doc(charette_id).collection(R::COLLECTION)
}
