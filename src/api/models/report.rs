//! Generated charette reports.

use serde::{Deserialize, Serialize};

use super::fields::{ChildRecord, Fields, ID, take_timestamp};
use super::timestamp::Timestamp;
use crate::storage::Document;

pub const GENERATED_AT: &str = "generatedAt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<Timestamp>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl ChildRecord for Report {
    const COLLECTION: &'static str = "reports";
    const STAMP_FIELD: &'static str = GENERATED_AT;

    fn from_document(document: Document) -> Self {
        let Document { id, mut fields } = document;
        fields.remove(ID);
        Self {
            id: Some(id),
            generated_at: take_timestamp(&mut fields, GENERATED_AT),
            fields,
        }
    }

    fn unsaved(fields: Fields) -> Self {
        Self {
            id: None,
            generated_at: None,
            fields,
        }
    }
}
