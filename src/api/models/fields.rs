//! Open field maps carried by every entity.

use serde_json::Value;

use super::timestamp::Timestamp;
use crate::storage::Document;

/// Caller-supplied fields, passed through the store unchanged.
pub type Fields = serde_json::Map<String, Value>;

/// Key holding the document id when an entity is serialized.
pub const ID: &str = "id";

/// A record stored in one of the per-charette sub-collections.
///
/// Each record kind owns exactly one store-generated timestamp, stamped on
/// insertion under [`ChildRecord::STAMP_FIELD`].
pub trait ChildRecord: Sized {
    /// Sub-collection name under `charettes/{charetteId}`.
    const COLLECTION: &'static str;
    /// Field stamped with the insertion time.
    const STAMP_FIELD: &'static str;

    /// Build the record from a stored document.
    fn from_document(document: Document) -> Self;

    /// Echo caller fields back without persisting them (degraded mode).
    fn unsaved(fields: Fields) -> Self;
}

/// Remove `key` if it holds a parseable timestamp, leaving anything else alone.
pub(crate) fn take_timestamp(fields: &mut Fields, key: &str) -> Option<Timestamp> {
    let parsed = fields.get(key).and_then(Value::as_str).and_then(Timestamp::parse)?;
    fields.remove(key);
    Some(parsed)
}

/// Remove `key` if it holds a string, leaving anything else alone.
pub(crate) fn take_string(fields: &mut Fields, key: &str) -> Option<String> {
    if !matches!(fields.get(key), Some(Value::String(_))) {
        return None;
    }
    match fields.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}
