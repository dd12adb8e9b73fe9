//! Core type definitions used across the DocStore workspace.

pub mod document;
pub mod filter;
pub mod query;
pub mod script;

pub use document::{ETAG_FIELD, ID_FIELD, TS_FIELD, from_envelope, to_envelope};
pub use filter::{Filter, FilterField, FilterOp, FilterValue};
pub use query::{DocumentPage, QueryOptions};
pub use script::{ProcedureDefinition, TriggerDefinition, TriggerOperation, TriggerType};
