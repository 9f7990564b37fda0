use super::CharetteStore;
use crate::models::analysis::TIMESTAMP;
use crate::models::{AnalysisResult, Fields};
use crate::storage::{Direction, Query, StorageResult};

impl CharetteStore {
    pub async fn store_analysis(
        &self,
        charette_id: &str,
        fields: Fields,
    ) -> StorageResult<AnalysisResult> {
        self.insert_child(charette_id, fields).await
    }

    /// Analysis results, most recent first.
    pub async fn get_analysis(&self, charette_id: &str) -> StorageResult<Vec<AnalysisResult>> {
        self.query_children(
            charette_id,
            Query::new().order_by(TIMESTAMP, Direction::Descending),
        )
        .await
    }
}
