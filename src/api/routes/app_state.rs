//! Application state management.
//!
//! Holds the shared charette store handed to every route handler.

use std::sync::Arc;

use crate::services::CharetteStore;

/// Application state shared across all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide charette store, initialized before serving
    pub store: Arc<CharetteStore>,
}

impl AppState {
    pub fn new(store: Arc<CharetteStore>) -> Self {
        Self { store }
    }

    /// Get a reference to the charette store.
    pub fn store(&self) -> &CharetteStore {
        &self.store
    }
}
