//! Charette CRUD.

use tracing::{debug, error, info};

use super::{CharetteStore, charettes};
use crate::models::charette::{CREATED_AT, UPDATED_AT};
use crate::models::fields::ID;
use crate::models::{Charette, CharettePatch, Fields};
use crate::storage::{Document, StorageResult};

impl CharetteStore {
    /// Every charette, in backend order.
    pub async fn list_charettes(&self) -> StorageResult<Vec<Charette>> {
        let Some(store) = self.document_store() else {
            return Ok(Vec::new());
        };

        let result = store
            .list(&charettes())
            .await
            .map(|documents| documents.into_iter().map(Charette::from_document).collect());
        self.settle_read("list_charettes", result, Vec::new)
    }

    /// A charette by id. Missing and unreadable documents both yield `None`.
    pub async fn get_charette(&self, id: &str) -> StorageResult<Option<Charette>> {
        let Some(store) = self.document_store() else {
            return Ok(None);
        };

        let result = store
            .get(&charettes().doc(id))
            .await
            .map(|document| document.map(Charette::from_document));
        self.settle_read("get_charette", result, || None)
    }

    /// Create a charette stamped with `createdAt == updatedAt`.
    ///
    /// In degraded mode the fields come back unchanged and without an id.
    pub async fn create_charette(&self, mut fields: Fields) -> StorageResult<Charette> {
        let Some(store) = self.document_store() else {
            debug!("Degraded mode, charette not persisted");
            return Ok(Charette::unsaved(fields));
        };

        let now = self.now();
        fields.remove(ID);
        fields.insert(CREATED_AT.to_string(), now.into());
        fields.insert(UPDATED_AT.to_string(), now.into());

        let id = store
            .add(&charettes(), fields.clone())
            .await
            .inspect_err(|e| error!(error = %e, "Failed to create charette"))?;
        info!(id = %id, "Charette created");

        Ok(Charette::from_document(Document::new(id, fields)))
    }

    /// Merge `patch` into an existing charette and refresh `updatedAt`.
    pub async fn update_charette(&self, id: &str, patch: CharettePatch) -> StorageResult<()> {
        let Some(store) = self.document_store() else {
            debug!(id, "Degraded mode, charette update skipped");
            return Ok(());
        };
        patch.validate()?;

        let mut fields = patch.into_fields();
        fields.insert(UPDATED_AT.to_string(), self.now().into());

        store
            .update(&charettes().doc(id), fields)
            .await
            .inspect_err(|e| error!(id, error = %e, "Failed to update charette"))?;
        debug!(id, "Charette updated");
        Ok(())
    }
}
