//! Shared test helpers for integration tests.
#![allow(dead_code)] // each test binary uses a different subset of helpers

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use docstore_client::MemoryStore;
use docstore_core::config::StoreConfig;
use docstore_core::result::AppResult;
use docstore_core::traits::entity::DocumentEntity;
use docstore_core::traits::store::DocumentStore;
use docstore_core::types::filter::Filter;
use docstore_core::types::query::{DocumentPage, QueryOptions};
use docstore_core::types::script::{ProcedureDefinition, TriggerDefinition};
use docstore_repository::DocumentRepository;

/// The document type the integration tests store and query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub completed: bool,
}

impl TodoItem {
    /// An incomplete item with the given id and name.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            completed: false,
        }
    }

    /// A completed item with the given id and name.
    pub fn done(id: &str, name: &str) -> Self {
        Self {
            completed: true,
            ..Self::new(id, name)
        }
    }
}

impl DocumentEntity for TodoItem {
    fn document_id(&self) -> &str {
        &self.id
    }
}

/// Store configuration addressing `db1`/`items` on a test endpoint.
pub fn store_config() -> StoreConfig {
    StoreConfig {
        endpoint: "memory://local".to_string(),
        key: "test-key".to_string(),
        database_id: "db1".to_string(),
        collection_id: "items".to_string(),
        default_throughput: 1000,
    }
}

/// A fresh repository over an empty in-memory store.
pub async fn new_repository() -> DocumentRepository<TodoItem> {
    let store = Arc::new(MemoryStore::new());
    DocumentRepository::new(store, &store_config())
        .await
        .expect("Failed to provision repository")
}

/// A fresh repository whose store caps query pages at `page_limit`
/// documents, forcing multi-page drains.
pub async fn new_paged_repository(page_limit: usize) -> DocumentRepository<TodoItem> {
    let store = Arc::new(MemoryStore::with_page_limit(page_limit));
    DocumentRepository::new(store, &store_config())
        .await
        .expect("Failed to provision repository")
}

/// Decorator around a [`DocumentStore`] that counts provisioning calls.
#[derive(Debug)]
pub struct RecordingStore {
    inner: Arc<dyn DocumentStore>,
    pub create_database_calls: AtomicUsize,
    pub create_collection_calls: AtomicUsize,
}

impl RecordingStore {
    pub fn wrap(inner: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner,
            create_database_calls: AtomicUsize::new(0),
            create_collection_calls: AtomicUsize::new(0),
        }
    }

    pub fn database_creates(&self) -> usize {
        self.create_database_calls.load(Ordering::SeqCst)
    }

    pub fn collection_creates(&self) -> usize {
        self.create_collection_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn read_database(&self, database_id: &str) -> AppResult<()> {
        self.inner.read_database(database_id).await
    }

    async fn create_database(&self, database_id: &str) -> AppResult<()> {
        self.create_database_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.create_database(database_id).await
    }

    async fn read_collection(&self, database_id: &str, collection_id: &str) -> AppResult<()> {
        self.inner.read_collection(database_id, collection_id).await
    }

    async fn create_collection(
        &self,
        database_id: &str,
        collection_id: &str,
        throughput: u32,
    ) -> AppResult<()> {
        self.create_collection_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .create_collection(database_id, collection_id, throughput)
            .await
    }

    async fn read_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> AppResult<Value> {
        self.inner
            .read_document(database_id, collection_id, document_id)
            .await
    }

    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document: Value,
    ) -> AppResult<Value> {
        self.inner
            .create_document(database_id, collection_id, document)
            .await
    }

    async fn replace_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        document: Value,
    ) -> AppResult<Value> {
        self.inner
            .replace_document(database_id, collection_id, document_id, document)
            .await
    }

    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> AppResult<()> {
        self.inner
            .delete_document(database_id, collection_id, document_id)
            .await
    }

    async fn query_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        filter: &Filter,
        options: &QueryOptions,
        continuation: Option<&str>,
    ) -> AppResult<DocumentPage> {
        self.inner
            .query_documents(database_id, collection_id, filter, options, continuation)
            .await
    }

    async fn create_stored_procedure(
        &self,
        database_id: &str,
        collection_id: &str,
        definition: &ProcedureDefinition,
    ) -> AppResult<()> {
        self.inner
            .create_stored_procedure(database_id, collection_id, definition)
            .await
    }

    async fn execute_stored_procedure(
        &self,
        database_id: &str,
        collection_id: &str,
        procedure_id: &str,
        args: &[Value],
    ) -> AppResult<Value> {
        self.inner
            .execute_stored_procedure(database_id, collection_id, procedure_id, args)
            .await
    }

    async fn create_trigger(
        &self,
        database_id: &str,
        collection_id: &str,
        definition: &TriggerDefinition,
    ) -> AppResult<()> {
        self.inner.create_trigger(database_id, collection_id, definition).await
    }
}

/// Store whose database read always fails with a transport error, for
/// asserting that non-not-found provisioning failures abort construction.
#[derive(Debug)]
pub struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn read_database(&self, _database_id: &str) -> AppResult<()> {
        Err(docstore_core::AppError::transport("Connection refused"))
    }

    async fn create_database(&self, _database_id: &str) -> AppResult<()> {
        Err(docstore_core::AppError::transport("Connection refused"))
    }

    async fn read_collection(&self, _database_id: &str, _collection_id: &str) -> AppResult<()> {
        Err(docstore_core::AppError::transport("Connection refused"))
    }

    async fn create_collection(
        &self,
        _database_id: &str,
        _collection_id: &str,
        _throughput: u32,
    ) -> AppResult<()> {
        Err(docstore_core::AppError::transport("Connection refused"))
    }

    async fn read_document(
        &self,
        _database_id: &str,
        _collection_id: &str,
        _document_id: &str,
    ) -> AppResult<Value> {
        Err(docstore_core::AppError::transport("Connection refused"))
    }

    async fn create_document(
        &self,
        _database_id: &str,
        _collection_id: &str,
        _document: Value,
    ) -> AppResult<Value> {
        Err(docstore_core::AppError::transport("Connection refused"))
    }

    async fn replace_document(
        &self,
        _database_id: &str,
        _collection_id: &str,
        _document_id: &str,
        _document: Value,
    ) -> AppResult<Value> {
        Err(docstore_core::AppError::transport("Connection refused"))
    }

    async fn delete_document(
        &self,
        _database_id: &str,
        _collection_id: &str,
        _document_id: &str,
    ) -> AppResult<()> {
        Err(docstore_core::AppError::transport("Connection refused"))
    }

    async fn query_documents(
        &self,
        _database_id: &str,
        _collection_id: &str,
        _filter: &Filter,
        _options: &QueryOptions,
        _continuation: Option<&str>,
    ) -> AppResult<DocumentPage> {
        Err(docstore_core::AppError::transport("Connection refused"))
    }

    async fn create_stored_procedure(
        &self,
        _database_id: &str,
        _collection_id: &str,
        _definition: &ProcedureDefinition,
    ) -> AppResult<()> {
        Err(docstore_core::AppError::transport("Connection refused"))
    }

    async fn execute_stored_procedure(
        &self,
        _database_id: &str,
        _collection_id: &str,
        _procedure_id: &str,
        _args: &[Value],
    ) -> AppResult<Value> {
        Err(docstore_core::AppError::transport("Connection refused"))
    }

    async fn create_trigger(
        &self,
        _database_id: &str,
        _collection_id: &str,
        _definition: &TriggerDefinition,
    ) -> AppResult<()> {
        Err(docstore_core::AppError::transport("Connection refused"))
    }
}
