//! Capability trait for typed documents.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record that can live in a document collection.
///
/// Implementors must serialize to a JSON object carrying their identifier
/// under the `id` field; deserialization must tolerate the server-assigned
/// metadata fields (`_ts`, `_etag`) that stored envelopes carry, which the
/// default serde behavior of ignoring unknown fields already provides.
pub trait DocumentEntity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The unique identifier of this document within its collection.
    fn document_id(&self) -> &str;
}
