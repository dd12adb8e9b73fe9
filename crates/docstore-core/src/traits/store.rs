//! Store client boundary trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::result::AppResult;
use crate::types::filter::Filter;
use crate::types::query::{DocumentPage, QueryOptions};
use crate::types::script::{ProcedureDefinition, TriggerDefinition};

/// The remote document store client boundary.
///
/// The repository consumes the store exclusively through this trait; vendor
/// SDK adapters and the in-memory client in `docstore-client` implement it.
/// Every failure carries an `ErrorKind` classification in which `NotFound`
/// and `Conflict` are distinguishable; all other kinds are opaque to the
/// repository.
///
/// Implementations must be safe for concurrent use: each method is a
/// self-contained request/response exchange, and multiple operations may be
/// in flight against the same client at once.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read a database by id, verifying it exists.
    async fn read_database(&self, database_id: &str) -> AppResult<()>;

    /// Create a database with the given id.
    async fn create_database(&self, database_id: &str) -> AppResult<()>;

    /// Read a collection by id, verifying it exists.
    async fn read_collection(&self, database_id: &str, collection_id: &str) -> AppResult<()>;

    /// Create a collection under a database with the given throughput.
    async fn create_collection(
        &self,
        database_id: &str,
        collection_id: &str,
        throughput: u32,
    ) -> AppResult<()>;

    /// Read a document envelope by id.
    async fn read_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> AppResult<Value>;

    /// Insert a new document envelope and return the stored representation.
    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document: Value,
    ) -> AppResult<Value>;

    /// Replace the document at `document_id` in full and return the stored
    /// representation.
    async fn replace_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        document: Value,
    ) -> AppResult<Value>;

    /// Delete the document at `document_id`.
    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> AppResult<()>;

    /// Run one round trip of a filtered query.
    ///
    /// Pass `None` as `continuation` for the first page and the token from
    /// the previous [`DocumentPage`] for each subsequent page.
    async fn query_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        filter: &Filter,
        options: &QueryOptions,
        continuation: Option<&str>,
    ) -> AppResult<DocumentPage>;

    /// Register a stored procedure on a collection.
    async fn create_stored_procedure(
        &self,
        database_id: &str,
        collection_id: &str,
        definition: &ProcedureDefinition,
    ) -> AppResult<()>;

    /// Execute a stored procedure by id and return its output.
    async fn execute_stored_procedure(
        &self,
        database_id: &str,
        collection_id: &str,
        procedure_id: &str,
        args: &[Value],
    ) -> AppResult<Value>;

    /// Register a trigger on a collection.
    async fn create_trigger(
        &self,
        database_id: &str,
        collection_id: &str,
        definition: &TriggerDefinition,
    ) -> AppResult<()>;
}
