use super::CharetteStore;
use crate::models::report::GENERATED_AT;
use crate::models::{Fields, Report};
use crate::storage::{Direction, Query, StorageResult};

impl CharetteStore {
    pub async fn store_report(&self, charette_id: &str, fields: Fields) -> StorageResult<Report> {
        self.insert_child(charette_id, fields).await
    }

    /// Every report, newest first.
    pub async fn get_reports(&self, charette_id: &str) -> StorageResult<Vec<Report>> {
        self.query_children(charette_id, newest_first()).await
    }

    /// The most recently generated report, if any.
    pub async fn get_latest_report(&self, charette_id: &str) -> StorageResult<Option<Report>> {
        let latest = self
            .query_children(charette_id, newest_first().limit(1))
            .await?;
        Ok(latest.into_iter().next())
    }
}

fn newest_first() -> Query {
    Query::new().order_by(GENERATED_AT, Direction::Descending)
}
