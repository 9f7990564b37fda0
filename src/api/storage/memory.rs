//! In-process document store.
//!
//! Mirrors the query semantics of the Firestore backend closely enough for
//! local runs and tests: equality filters compare numbers by value, ordering
//! follows Firestore's cross-type order, and ordering on a field drops
//! documents that lack it. Nothing survives the process.

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::config::Credentials;
use super::traits::{
    CollectionPath, Connector, Direction, Document, DocumentPath, DocumentStore, Query,
};
use super::{StorageError, StorageResult};
use crate::models::Fields;

/// Memory-backed document store. Documents keep their insertion order.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<CollectionPath, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub async fn len(&self, collection: &CollectionPath) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, path: &DocumentPath) -> StorageResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&path.parent())
            .and_then(|docs| docs.iter().find(|doc| doc.id == path.id()))
            .cloned())
    }

    async fn add(&self, collection: &CollectionPath, fields: Fields) -> StorageResult<String> {
        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .write()
            .await
            .entry(collection.clone())
            .or_default()
            .push(Document::new(id.clone(), fields));
        Ok(id)
    }

    async fn update(&self, path: &DocumentPath, fields: Fields) -> StorageResult<()> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(&path.parent())
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == path.id()))
            .ok_or_else(|| StorageError::NotFound {
                entity_type: "document".to_string(),
                entity_id: path.to_string(),
            })?;
        document.fields.extend(fields);
        Ok(())
    }

    async fn query(
        &self,
        collection: &CollectionPath,
        query: &Query,
    ) -> StorageResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matches: Vec<Document> = documents
            .iter()
            .filter(|doc| {
                query.filters().iter().all(|filter| {
                    doc.fields
                        .get(&filter.field)
                        .is_some_and(|value| compare_values(value, &filter.value).is_eq())
                })
            })
            .cloned()
            .collect();

        if let Some(order) = query.ordering() {
            matches.retain(|doc| doc.fields.contains_key(&order.field));
            // sort_by is stable, so ties keep insertion order
            matches.sort_by(|a, b| {
                let ordering = compare_values(
                    a.fields.get(&order.field).unwrap_or(&Value::Null),
                    b.fields.get(&order.field).unwrap_or(&Value::Null),
                );
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = query.max_results() {
            matches.truncate(limit);
        }
        Ok(matches)
    }
}

/// Connector handing out one shared [`MemoryDocumentStore`].
#[derive(Debug, Default)]
pub struct MemoryConnector {
    store: Arc<MemoryDocumentStore>,
    attempts: AtomicUsize,
}

impl MemoryConnector {
    pub fn new(store: Arc<MemoryDocumentStore>) -> Self {
        Self {
            store,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn store(&self) -> Arc<MemoryDocumentStore> {
        self.store.clone()
    }

    /// How many times `connect` has been called.
    pub fn attempts(&self) -> usize {
        self.attempts.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self, _credentials: &Credentials) -> StorageResult<Arc<dyn DocumentStore>> {
        self.attempts.fetch_add(1, AtomicOrdering::SeqCst);
        Ok(self.store.clone())
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values, following Firestore's type ordering.
pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x.cmp(&y)
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x.cmp(&y)
            } else {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y)
            .map(|(l, r)| compare_values(l, r))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Value::Object(x), Value::Object(y)) => {
            let mut left: Vec<_> = x.iter().collect();
            let mut right: Vec<_> = y.iter().collect();
            left.sort_by(|l, r| l.0.cmp(r.0));
            right.sort_by(|l, r| l.0.cmp(r.0));
            left.iter()
                .zip(&right)
                .map(|((lk, lv), (rk, rv))| lk.cmp(rk).then_with(|| compare_values(lv, rv)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| left.len().cmp(&right.len()))
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
