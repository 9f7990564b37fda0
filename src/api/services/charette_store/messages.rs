use super::CharetteStore;
use crate::models::Fields;
use crate::models::Message;
use crate::models::message::{ROOM_ID, TIMESTAMP};
use crate::storage::{Direction, Query, StorageResult};

impl CharetteStore {
    pub async fn add_message(&self, charette_id: &str, fields: Fields) -> StorageResult<Message> {
        self.insert_child(charette_id, fields).await
    }

    /// Messages oldest first, optionally restricted to one breakout room.
    pub async fn get_messages(
        &self,
        charette_id: &str,
        room_id: Option<&str>,
    ) -> StorageResult<Vec<Message>> {
        let mut query = Query::new();
        if let Some(room_id) = room_id {
            query = query.where_eq(ROOM_ID, room_id);
        }
        self.query_children(charette_id, query.order_by(TIMESTAMP, Direction::Ascending))
            .await
    }
}
