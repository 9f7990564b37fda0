//! Analysis results produced while a charette runs.

use serde::{Deserialize, Serialize};

use super::fields::{ChildRecord, Fields, ID, take_timestamp};
use super::timestamp::Timestamp;
use crate::storage::Document;

pub const TIMESTAMP: &str = "timestamp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl ChildRecord for AnalysisResult {
    const COLLECTION: &'static str = "analysis";
    const STAMP_FIELD: &'static str = TIMESTAMP;

    fn from_document(document: Document) -> Self {
        let Document { id, mut fields } = document;
        fields.remove(ID);
        Self {
            id: Some(id),
            timestamp: take_timestamp(&mut fields, TIMESTAMP),
            fields,
        }
    }

    fn unsaved(fields: Fields) -> Self {
        Self {
            id: None,
            timestamp: None,
            fields,
        }
    }
}
