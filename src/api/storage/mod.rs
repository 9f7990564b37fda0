//! Storage module for the API.
//!
//! Defines the document store contract and its backends: Cloud Firestore for
//! persistent deployments and an in-process store for local runs and tests.

pub mod clock;
pub mod config;
pub mod error;
pub mod traits;

// Storage backend implementations
pub mod firestore;
pub mod memory;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Credentials, ReadPolicy, StoreConfig};
pub use error::{StorageError, StorageResult};
pub use firestore::{FirestoreConnector, FirestoreStore};
pub use memory::{MemoryConnector, MemoryDocumentStore};
pub use traits::{
    CollectionPath, Connector, Direction, Document, DocumentPath, DocumentStore, Query,
};
