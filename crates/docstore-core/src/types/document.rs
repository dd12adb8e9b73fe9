//! Document envelope helpers.
//!
//! Documents cross the store boundary as untyped JSON envelopes. The helpers
//! here convert between a typed record and its envelope, with every failure
//! surfaced as an explicit serialization or validation error.

use serde_json::Value;

use crate::error::AppError;
use crate::result::AppResult;
use crate::traits::entity::DocumentEntity;

/// Field holding the unique document identifier.
pub const ID_FIELD: &str = "id";
/// Server-assigned field holding the last-write epoch timestamp.
pub const TS_FIELD: &str = "_ts";
/// Server-assigned field holding the document entity tag.
pub const ETAG_FIELD: &str = "_etag";

/// Serialize a typed document into its wire envelope.
///
/// The envelope must be a JSON object carrying a non-empty string `id`;
/// anything else is rejected before it reaches the store.
pub fn to_envelope<T: DocumentEntity>(item: &T) -> AppResult<Value> {
    let envelope = serde_json::to_value(item)?;
    match document_id(&envelope) {
        Some(id) if !id.is_empty() => Ok(envelope),
        _ => Err(AppError::validation(
            "Document must serialize to an object with a non-empty string 'id'",
        )),
    }
}

/// Deserialize a wire envelope into a typed document.
///
/// A malformed envelope is a serialization failure, never silently coerced.
pub fn from_envelope<T: DocumentEntity>(envelope: Value) -> AppResult<T> {
    serde_json::from_value(envelope).map_err(|e| {
        AppError::with_source(
            crate::error::ErrorKind::Serialization,
            format!("Failed to deserialize document envelope: {e}"),
            e,
        )
    })
}

/// Read the document identifier out of an envelope, if present.
pub fn document_id(envelope: &Value) -> Option<&str> {
    envelope.get(ID_FIELD)?.as_str()
}
