//! Generic typed repository over a provisioned document collection.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use docstore_core::config::StoreConfig;
use docstore_core::error::{AppError, ErrorKind};
use docstore_core::result::AppResult;
use docstore_core::traits::entity::DocumentEntity;
use docstore_core::traits::store::DocumentStore;
use docstore_core::types::document;
use docstore_core::types::filter::Filter;
use docstore_core::types::query::QueryOptions;
use docstore_core::types::script::{ProcedureDefinition, TriggerDefinition};

/// Typed CRUD and query repository for one document collection.
///
/// Construction is an async factory: [`DocumentRepository::new`] provisions
/// the target database and collection before returning, so a value of this
/// type always addresses existing resources. Instances are cheap to clone
/// and safe to share; concurrent operations on one instance need no
/// additional locking because every call is a self-contained exchange with
/// the store.
#[derive(Debug, Clone)]
pub struct DocumentRepository<T> {
    store: Arc<dyn DocumentStore>,
    database_id: String,
    collection_id: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T: DocumentEntity> DocumentRepository<T> {
    /// Provision the configured database and collection, then return a
    /// usable repository.
    ///
    /// Provisioning failures other than the not-found-then-create path are
    /// fatal: no repository value exists if this returns an error.
    pub async fn new(store: Arc<dyn DocumentStore>, config: &StoreConfig) -> AppResult<Self> {
        crate::provision::provision(store.as_ref(), config).await?;
        Ok(Self {
            store,
            database_id: config.database_id.clone(),
            collection_id: config.collection_id.clone(),
            _entity: PhantomData,
        })
    }

    /// The id of the database this repository addresses.
    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// The id of the collection this repository addresses.
    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    /// Read one document by id.
    ///
    /// An absent document is `Ok(None)`, not an error; every other failure
    /// surfaces, including a document that exists but does not deserialize
    /// into `T`.
    pub async fn get(&self, id: &str) -> AppResult<Option<T>> {
        match self
            .store
            .read_document(&self.database_id, &self.collection_id, id)
            .await
        {
            Ok(envelope) => Ok(Some(document::from_envelope(envelope)?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Insert a new document and return the stored representation,
    /// including server-assigned metadata handling.
    ///
    /// A document with the same id already present surfaces as a conflict.
    pub async fn create(&self, item: &T) -> AppResult<T> {
        let envelope = document::to_envelope(item)?;
        let stored = self
            .store
            .create_document(&self.database_id, &self.collection_id, envelope)
            .await?;
        document::from_envelope(stored)
    }

    /// Replace the document at `id` in full with `item`.
    ///
    /// Surfaces not-found when no document exists at `id`. There is no
    /// partial-field update.
    pub async fn update(&self, id: &str, item: &T) -> AppResult<T> {
        let envelope = document::to_envelope(item)?;
        let stored = self
            .store
            .replace_document(&self.database_id, &self.collection_id, id, envelope)
            .await?;
        document::from_envelope(stored)
    }

    /// Delete the document at `id`.
    ///
    /// Surfaces not-found when no document exists at `id`.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store
            .delete_document(&self.database_id, &self.collection_id, id)
            .await
    }

    /// Run a predicate query and return every matching document.
    ///
    /// Requests an unbounded page size and drains all continuation pages
    /// before returning, so the caller always sees the full, finite result
    /// set. Ordering is store-defined. A failure on any page fetch or any
    /// envelope deserialization aborts the whole call; no partial results
    /// are returned.
    pub async fn query(&self, filter: &Filter) -> AppResult<Vec<T>> {
        let options = QueryOptions::unbounded();
        let mut items = Vec::new();
        let mut continuation: Option<String> = None;
        loop {
            let page = self
                .store
                .query_documents(
                    &self.database_id,
                    &self.collection_id,
                    filter,
                    &options,
                    continuation.as_deref(),
                )
                .await?;
            for envelope in page.documents {
                items.push(document::from_envelope(envelope)?);
            }
            match page.continuation {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }
        Ok(items)
    }

    /// Register a stored procedure on the collection.
    ///
    /// Registration is idempotent: an already-registered procedure is
    /// success-equivalent. Every other failure surfaces, so credential or
    /// quota problems are not masked as silent no-ops.
    pub async fn register_procedure(&self, definition: &ProcedureDefinition) -> AppResult<()> {
        match self
            .store
            .create_stored_procedure(&self.database_id, &self.collection_id, definition)
            .await
        {
            Ok(()) => {
                debug!(procedure = %definition.id, "Registered stored procedure");
                Ok(())
            }
            Err(e) if e.is_conflict() => {
                debug!(procedure = %definition.id, "Stored procedure already registered");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Execute a stored procedure by id and deserialize its output.
    ///
    /// Execution failures surface unmodified, including not-found for a
    /// procedure that was never registered.
    pub async fn execute_procedure<R: DeserializeOwned>(
        &self,
        procedure_id: &str,
        args: &[Value],
    ) -> AppResult<R> {
        let result = self
            .store
            .execute_stored_procedure(&self.database_id, &self.collection_id, procedure_id, args)
            .await?;
        serde_json::from_value(result).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Failed to deserialize result of stored procedure '{procedure_id}': {e}"),
                e,
            )
        })
    }

    /// Register a trigger on the collection.
    ///
    /// Same idempotence policy as [`register_procedure`]; the store invokes
    /// registered triggers implicitly on matching operations, so there is
    /// no execute counterpart here.
    ///
    /// [`register_procedure`]: DocumentRepository::register_procedure
    pub async fn register_trigger(&self, definition: &TriggerDefinition) -> AppResult<()> {
        match self
            .store
            .create_trigger(&self.database_id, &self.collection_id, definition)
            .await
        {
            Ok(()) => {
                debug!(trigger = %definition.id, "Registered trigger");
                Ok(())
            }
            Err(e) if e.is_conflict() => {
                debug!(trigger = %definition.id, "Trigger already registered");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
