//! Discussion messages posted during a charette.

use serde::{Deserialize, Serialize};

use super::fields::{ChildRecord, Fields, ID, take_string, take_timestamp};
use super::timestamp::Timestamp;
use crate::storage::Document;

pub const ROOM_ID: &str = "roomId";
pub const TIMESTAMP: &str = "timestamp";

/// A message in the main discussion or in a breakout room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Breakout room the message belongs to; `None` for the main session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl ChildRecord for Message {
    const COLLECTION: &'static str = "messages";
    const STAMP_FIELD: &'static str = TIMESTAMP;

    fn from_document(document: Document) -> Self {
        let Document { id, mut fields } = document;
        fields.remove(ID);
        Self {
            id: Some(id),
            room_id: take_string(&mut fields, ROOM_ID),
            timestamp: take_timestamp(&mut fields, TIMESTAMP),
            fields,
        }
    }

    fn unsaved(mut fields: Fields) -> Self {
        Self {
            id: None,
            room_id: take_string(&mut fields, ROOM_ID),
            timestamp: None,
            fields,
        }
    }
}
