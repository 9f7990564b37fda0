//! Document store contract shared by every backend.
//!
//! The model is a tree of collections and documents: a collection holds
//! documents addressed by id, and each document may own nested collections.
//! Charettes live in the root `charettes` collection and their messages,
//! participants, analysis results and reports in collections below them.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::StorageResult;
use super::config::Credentials;
use crate::models::Fields;

/// Address of a collection: `charettes` or `charettes/{id}/messages`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    segments: Vec<String>,
}

/// Address of a single document: `charettes/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// A top-level collection.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// The document with `id` inside this collection.
    pub fn doc(&self, id: impl Into<String>) -> DocumentPath {
        let mut segments = self.segments.clone();
        segments.push(id.into());
        DocumentPath { segments }
    }

    /// Collection name, i.e. the last path segment.
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// The document owning this collection, `None` for root collections.
    pub fn parent(&self) -> Option<DocumentPath> {
        (self.segments.len() > 1).then(|| DocumentPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl DocumentPath {
    /// A nested collection below this document.
    pub fn collection(&self, name: impl Into<String>) -> CollectionPath {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        CollectionPath { segments }
    }

    pub fn id(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// The collection this document lives in.
    pub fn parent(&self) -> CollectionPath {
        CollectionPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// A stored document: its id plus the field map.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// An equality filter on a top-level field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Collection query: equality filters, then ordering, then a limit.
///
/// Ordering on a field drops documents that do not have that field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    filters: Vec<FieldFilter>,
    order_by: Option<OrderBy>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    pub fn ordering(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    pub fn max_results(&self) -> Option<usize> {
        self.limit
    }
}

/// Document database backend.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document, `None` if it does not exist.
    async fn get(&self, path: &DocumentPath) -> StorageResult<Option<Document>>;

    /// Insert a document with a generated id and return that id.
    async fn add(&self, collection: &CollectionPath, fields: Fields) -> StorageResult<String>;

    /// Merge the given top-level fields into an existing document.
    ///
    /// Fails with `StorageError::NotFound` when the document does not exist.
    async fn update(&self, path: &DocumentPath, fields: Fields) -> StorageResult<()>;

    /// Run a query against one collection.
    async fn query(
        &self,
        collection: &CollectionPath,
        query: &Query,
    ) -> StorageResult<Vec<Document>>;

    /// Every document in a collection, in backend-defined order.
    async fn list(&self, collection: &CollectionPath) -> StorageResult<Vec<Document>> {
        self.query(collection, &Query::new()).await
    }
}

/// Opens a backend from the configured credential triple.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, credentials: &Credentials) -> StorageResult<Arc<dyn DocumentStore>>;
}
