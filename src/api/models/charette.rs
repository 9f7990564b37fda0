//! Charette session records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{Fields, ID, take_timestamp};
use super::timestamp::Timestamp;
use crate::storage::{Document, StorageError, StorageResult};

/// Root collection holding every charette document.
pub const COLLECTION: &str = "charettes";
pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";

/// A structured, multi-phase planning session.
///
/// Everything other than the id and the two lifecycle timestamps (title,
/// phase, facilitator, ...) lives in `fields` and is never interpreted by the
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charette {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Charette {
    pub(crate) fn from_document(document: Document) -> Self {
        let Document { id, mut fields } = document;
        fields.remove(ID);
        Self {
            id: Some(id),
            created_at: take_timestamp(&mut fields, CREATED_AT),
            updated_at: take_timestamp(&mut fields, UPDATED_AT),
            fields,
        }
    }

    /// The caller's fields, echoed back as-is when nothing was persisted.
    pub(crate) fn unsaved(fields: Fields) -> Self {
        Self {
            id: None,
            created_at: None,
            updated_at: None,
            fields,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// A partial update merged into an existing charette.
///
/// Only the supplied keys change; `updatedAt` is refreshed by the store.
/// Store-managed keys cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharettePatch(Fields);

impl CharettePatch {
    pub const RESERVED: [&'static str; 3] = [ID, CREATED_AT, UPDATED_AT];

    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single field, builder style.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn fields(&self) -> &Fields {
        &self.0
    }

    /// Reject patches that would overwrite a store-managed key.
    pub fn validate(&self) -> StorageResult<()> {
        match Self::RESERVED.iter().find(|key| self.0.contains_key(**key)) {
            Some(field) => Err(StorageError::ReservedField {
                field: (*field).to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn into_fields(self) -> Fields {
        self.0
    }
}

impl From<Fields> for CharettePatch {
    fn from(fields: Fields) -> Self {
        Self(fields)
    }
}
