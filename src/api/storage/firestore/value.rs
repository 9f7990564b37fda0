//! JSON <-> Firestore typed value codec.
//!
//! Firestore's REST API wraps every value in a single-key object naming its
//! type (`{"stringValue": "x"}`, `{"integerValue": "42"}`, ...). Entity
//! fields are plain JSON, so everything crossing the wire goes through here.

use serde_json::{Number, Value, json};

use crate::models::Fields;
use crate::storage::{Document, StorageError, StorageResult};

pub(crate) fn encode_fields(fields: &Fields) -> StorageResult<Value> {
    fields
        .iter()
        .map(|(key, value)| Ok((key.clone(), encode_value(value)?)))
        .collect::<StorageResult<_>>()
        .map(Value::Object)
}

/// Encode one JSON value. Firestore integers are signed 64-bit, so larger
/// unsigned values are rejected rather than rounded into a double.
pub(crate) fn encode_value(value: &Value) -> StorageResult<Value> {
    Ok(match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                json!({ "integerValue": integer.to_string() })
            } else if number.is_u64() {
                return Err(StorageError::InvalidData(format!(
                    "integer {number} is outside Firestore's signed 64-bit range"
                )));
            } else {
                json!({ "doubleValue": number.as_f64().unwrap_or_default() })
            }
        }
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(items) => json!({
            "arrayValue": {
                "values": items.iter().map(encode_value).collect::<StorageResult<Vec<_>>>()?
            }
        }),
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map)? } }),
    })
}

/// Decode a document's `fields` object. A missing object is an empty document.
pub(crate) fn decode_fields(encoded: Option<&Value>) -> StorageResult<Fields> {
    let Some(encoded) = encoded else {
        return Ok(Fields::new());
    };
    let map = encoded
        .as_object()
        .ok_or_else(|| StorageError::InvalidData("document fields must be an object".into()))?;
    map.iter()
        .map(|(key, value)| Ok((key.clone(), decode_value(value)?)))
        .collect()
}

pub(crate) fn decode_value(encoded: &Value) -> StorageResult<Value> {
    let (kind, inner) = encoded
        .as_object()
        .and_then(|map| map.iter().next())
        .ok_or_else(|| StorageError::InvalidData(format!("malformed Firestore value: {encoded}")))?;
    let malformed = || StorageError::InvalidData(format!("malformed {kind}: {inner}"));

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner.as_bool().map(Value::Bool).ok_or_else(malformed),
        "integerValue" => match inner {
            Value::String(raw) => raw.parse::<i64>().ok(),
            Value::Number(number) => number.as_i64(),
            _ => None,
        }
        .map(Value::from)
        .ok_or_else(malformed),
        "doubleValue" => match inner {
            Value::Number(_) => Ok(inner.clone()),
            // NaN and the infinities arrive as strings and have no JSON form
            Value::String(raw) => Ok(raw
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map_or(Value::Null, Value::Number)),
            _ => Err(malformed()),
        },
        "stringValue" | "timestampValue" | "bytesValue" | "referenceValue" => {
            inner.as_str().map(Value::from).ok_or_else(malformed)
        }
        "geoPointValue" => Ok(json!({
            "latitude": inner.get("latitude").cloned().unwrap_or(json!(0.0)),
            "longitude": inner.get("longitude").cloned().unwrap_or(json!(0.0)),
        })),
        "arrayValue" => inner
            .get("values")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(decode_value).collect::<StorageResult<Vec<_>>>())
            .unwrap_or_else(|| Ok(Vec::new()))
            .map(Value::Array),
        "mapValue" => decode_fields(inner.get("fields")).map(Value::Object),
        other => Err(StorageError::InvalidData(format!(
            "unsupported Firestore value type: {other}"
        ))),
    }
}

/// Decode a REST `Document` resource; the id is the last segment of `name`.
pub(crate) fn decode_document(encoded: &Value) -> StorageResult<Document> {
    let name = encoded
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| StorageError::InvalidData("document without a name".into()))?;
    let id = name.rsplit('/').next().unwrap_or(name);
    Ok(Document::new(id, decode_fields(encoded.get("fields"))?))
}

/// Quote a field name for use in a field path when it is not a bare identifier.
pub(crate) fn field_path(name: &str) -> String {
    let bare = name
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if bare {
        name.to_string()
    } else {
        format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
    }
}
