//! People taking part in a charette.

use serde::{Deserialize, Serialize};

use super::fields::{ChildRecord, Fields, ID, take_timestamp};
use super::timestamp::Timestamp;
use crate::storage::Document;

pub const JOINED_AT: &str = "joinedAt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<Timestamp>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl ChildRecord for Participant {
    const COLLECTION: &'static str = "participants";
    const STAMP_FIELD: &'static str = JOINED_AT;

    fn from_document(document: Document) -> Self {
        let Document { id, mut fields } = document;
        fields.remove(ID);
        Self {
            id: Some(id),
            joined_at: take_timestamp(&mut fields, JOINED_AT),
            fields,
        }
    }

    fn unsaved(fields: Fields) -> Self {
        Self {
            id: None,
            joined_at: None,
            fields,
        }
    }
}
