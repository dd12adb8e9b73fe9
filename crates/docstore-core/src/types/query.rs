//! Query option and result-page types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options controlling a single query round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Maximum number of documents the store should return per page.
    /// `None` requests an unbounded page size; the store may still cap it
    /// and hand back a continuation token.
    pub max_item_count: Option<u32>,
}

impl QueryOptions {
    /// Request an unbounded page size.
    pub fn unbounded() -> Self {
        Self {
            max_item_count: None,
        }
    }

    /// Request a specific page size.
    pub fn paged(max_item_count: u32) -> Self {
        Self {
            max_item_count: Some(max_item_count),
        }
    }
}

/// One page of query results.
///
/// A `Some` continuation token means the store holds more results; callers
/// must keep fetching until the token is `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentPage {
    /// The document envelopes on this page.
    pub documents: Vec<Value>,
    /// Opaque token addressing the next page, if any.
    pub continuation: Option<String>,
}

impl DocumentPage {
    /// Whether more pages remain after this one.
    pub fn has_more(&self) -> bool {
        self.continuation.is_some()
    }
}
