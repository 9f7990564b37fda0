use super::CharetteStore;
use crate::models::{Fields, Participant};
use crate::storage::{Query, StorageResult};

impl CharetteStore {
    pub async fn add_participant(
        &self,
        charette_id: &str,
        fields: Fields,
    ) -> StorageResult<Participant> {
        self.insert_child(charette_id, fields).await
    }

    /// Participants in backend order.
    pub async fn get_participants(&self, charette_id: &str) -> StorageResult<Vec<Participant>> {
        self.query_children(charette_id, Query::new()).await
    }
}
