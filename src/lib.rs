//! Persistence layer for charettes: structured, multi-phase planning
//! sessions with messages, participants, analysis results and reports.
//!
//! [`services::CharetteStore`] is the single data-access surface. It runs
//! against Cloud Firestore when credentials are configured and degrades to a
//! no-op store otherwise. The `api` binary exposes it over HTTP.

pub mod api;

// Re-export api modules at crate root (so routes can use crate::services, crate::models)
pub use api::middleware;
pub use api::models;
pub use api::openapi;
pub use api::routes;
pub use api::services;
pub use api::storage;

pub use api::models::{AnalysisResult, Charette, CharettePatch, Fields, Message, Participant, Report};
pub use api::services::{CharetteStore, StoreMode};
pub use api::storage::{ReadPolicy, StorageError, StorageResult, StoreConfig};
