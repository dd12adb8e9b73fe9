//! In-memory document store client.
//!
//! Models the store semantics the repository depends on: not-found and
//! conflict classification, server-assigned envelope metadata, and
//! continuation-token pagination. Script bodies are stored verbatim but not
//! interpreted; executing a registered procedure returns an acknowledgment
//! string payload. Nothing is durable.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use docstore_core::error::AppError;
use docstore_core::result::AppResult;
use docstore_core::traits::store::DocumentStore;
use docstore_core::types::document::{self, ETAG_FIELD, TS_FIELD};
use docstore_core::types::filter::Filter;
use docstore_core::types::query::{DocumentPage, QueryOptions};
use docstore_core::types::script::{ProcedureDefinition, TriggerDefinition};

/// In-memory [`DocumentStore`] implementation.
///
/// Safe for concurrent use: state lives in concurrent maps and every
/// operation is a self-contained exchange.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Databases by id.
    databases: DashMap<String, MemoryDatabase>,
    /// Server-side cap on documents per query page, applied on top of the
    /// requested page size. Mirrors the response limits of real stores.
    page_limit: Option<usize>,
}

#[derive(Debug, Default)]
struct MemoryDatabase {
    collections: DashMap<String, MemoryCollection>,
}

#[derive(Debug)]
struct MemoryCollection {
    throughput: u32,
    documents: DashMap<String, Value>,
    procedures: DashMap<String, ProcedureDefinition>,
    triggers: DashMap<String, TriggerDefinition>,
}

impl MemoryCollection {
    fn new(throughput: u32) -> Self {
        Self {
            throughput,
            documents: DashMap::new(),
            procedures: DashMap::new(),
            triggers: DashMap::new(),
        }
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that returns at most `limit` documents per
    /// query page, forcing continuation tokens even for unbounded requests.
    pub fn with_page_limit(limit: usize) -> Self {
        Self {
            databases: DashMap::new(),
            page_limit: Some(limit),
        }
    }

    /// The throughput a collection was created with, if it exists.
    /// Diagnostic accessor used by tests and tooling.
    pub fn collection_throughput(&self, database_id: &str, collection_id: &str) -> Option<u32> {
        let db = self.databases.get(database_id)?;
        let throughput = db.collections.get(collection_id)?.throughput;
        Some(throughput)
    }

    /// Run `f` against a collection, resolving the database and collection
    /// ids first. Lock guards are never held across await points because
    /// every caller is fully synchronous inside `f`.
    fn with_collection<R>(
        &self,
        database_id: &str,
        collection_id: &str,
        f: impl FnOnce(&MemoryCollection) -> AppResult<R>,
    ) -> AppResult<R> {
        let db = self
            .databases
            .get(database_id)
            .ok_or_else(|| AppError::not_found(format!("Database '{database_id}' not found")))?;
        let coll = db.collections.get(collection_id).ok_or_else(|| {
            AppError::not_found(format!("Collection '{collection_id}' not found"))
        })?;
        f(&coll)
    }
}

/// Stamp the server-assigned metadata fields onto an envelope.
fn stamp_metadata(mut envelope: Value) -> Value {
    if let Some(map) = envelope.as_object_mut() {
        map.insert(TS_FIELD.to_string(), Value::from(Utc::now().timestamp()));
        map.insert(
            ETAG_FIELD.to_string(),
            Value::from(Uuid::new_v4().to_string()),
        );
    }
    envelope
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read_database(&self, database_id: &str) -> AppResult<()> {
        self.databases
            .get(database_id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Database '{database_id}' not found")))
    }

    async fn create_database(&self, database_id: &str) -> AppResult<()> {
        match self.databases.entry(database_id.to_string()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Database '{database_id}' already exists"
            ))),
            Entry::Vacant(entry) => {
                entry.insert(MemoryDatabase::default());
                debug!(database = database_id, "Created database");
                Ok(())
            }
        }
    }

    async fn read_collection(&self, database_id: &str, collection_id: &str) -> AppResult<()> {
        self.with_collection(database_id, collection_id, |_| Ok(()))
    }

    async fn create_collection(
        &self,
        database_id: &str,
        collection_id: &str,
        throughput: u32,
    ) -> AppResult<()> {
        let db = self
            .databases
            .get(database_id)
            .ok_or_else(|| AppError::not_found(format!("Database '{database_id}' not found")))?;
        match db.collections.entry(collection_id.to_string()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Collection '{collection_id}' already exists"
            ))),
            Entry::Vacant(entry) => {
                entry.insert(MemoryCollection::new(throughput));
                debug!(
                    database = database_id,
                    collection = collection_id,
                    throughput,
                    "Created collection"
                );
                Ok(())
            }
        }
    }

    async fn read_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> AppResult<Value> {
        self.with_collection(database_id, collection_id, |coll| {
            coll.documents
                .get(document_id)
                .map(|doc| doc.clone())
                .ok_or_else(|| {
                    AppError::not_found(format!("Document '{document_id}' not found"))
                })
        })
    }

    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document: Value,
    ) -> AppResult<Value> {
        self.with_collection(database_id, collection_id, |coll| {
            let id = document::document_id(&document)
                .filter(|id| !id.is_empty())
                .ok_or_else(|| {
                    AppError::validation("Document envelope is missing a string 'id'")
                })?
                .to_string();
            let stored = stamp_metadata(document);
            match coll.documents.entry(id) {
                Entry::Occupied(entry) => Err(AppError::conflict(format!(
                    "Document '{}' already exists",
                    entry.key()
                ))),
                Entry::Vacant(entry) => {
                    entry.insert(stored.clone());
                    Ok(stored)
                }
            }
        })
    }

    async fn replace_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        document: Value,
    ) -> AppResult<Value> {
        self.with_collection(database_id, collection_id, |coll| {
            if let Some(id) = document::document_id(&document) {
                if id != document_id {
                    return Err(AppError::validation(format!(
                        "Envelope id '{id}' does not match addressed document '{document_id}'"
                    )));
                }
            }
            let mut slot = coll.documents.get_mut(document_id).ok_or_else(|| {
                AppError::not_found(format!("Document '{document_id}' not found"))
            })?;
            let stored = stamp_metadata(document);
            *slot = stored.clone();
            Ok(stored)
        })
    }

    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> AppResult<()> {
        self.with_collection(database_id, collection_id, |coll| {
            coll.documents
                .remove(document_id)
                .map(|_| ())
                .ok_or_else(|| {
                    AppError::not_found(format!("Document '{document_id}' not found"))
                })
        })
    }

    async fn query_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        filter: &Filter,
        options: &QueryOptions,
        continuation: Option<&str>,
    ) -> AppResult<DocumentPage> {
        self.with_collection(database_id, collection_id, |coll| {
            // Pages are computed against the live map ordered by id, so
            // continuation offsets stay meaningful across round trips.
            let mut matching: Vec<(String, Value)> = coll
                .documents
                .iter()
                .filter(|entry| crate::eval::matches(entry.value(), filter))
                .map(|entry| (entry.key().clone(), entry.value().clone()))
                .collect();
            matching.sort_by(|a, b| a.0.cmp(&b.0));

            let start = match continuation {
                Some(token) => token.parse::<usize>().map_err(|_| {
                    AppError::validation(format!("Malformed continuation token '{token}'"))
                })?,
                None => 0,
            };
            let requested = options
                .max_item_count
                .map(|n| n as usize)
                .unwrap_or(usize::MAX);
            let page_size = self
                .page_limit
                .map_or(requested, |cap| requested.min(cap))
                .max(1);

            let end = start.saturating_add(page_size).min(matching.len());
            let documents: Vec<Value> = matching
                .get(start..end)
                .unwrap_or(&[])
                .iter()
                .map(|(_, doc)| doc.clone())
                .collect();
            let continuation = (end < matching.len()).then(|| end.to_string());
            Ok(DocumentPage {
                documents,
                continuation,
            })
        })
    }

    async fn create_stored_procedure(
        &self,
        database_id: &str,
        collection_id: &str,
        definition: &ProcedureDefinition,
    ) -> AppResult<()> {
        self.with_collection(database_id, collection_id, |coll| {
            match coll.procedures.entry(definition.id.clone()) {
                Entry::Occupied(_) => Err(AppError::conflict(format!(
                    "Stored procedure '{}' already exists",
                    definition.id
                ))),
                Entry::Vacant(entry) => {
                    entry.insert(definition.clone());
                    Ok(())
                }
            }
        })
    }

    async fn execute_stored_procedure(
        &self,
        database_id: &str,
        collection_id: &str,
        procedure_id: &str,
        args: &[Value],
    ) -> AppResult<Value> {
        self.with_collection(database_id, collection_id, |coll| {
            if !coll.procedures.contains_key(procedure_id) {
                return Err(AppError::not_found(format!(
                    "Stored procedure '{procedure_id}' not found"
                )));
            }
            debug!(
                procedure = procedure_id,
                args = args.len(),
                "Executing stored procedure"
            );
            // Bodies are not interpreted; acknowledge with a string payload.
            Ok(Value::String(format!("{procedure_id}: acknowledged")))
        })
    }

    async fn create_trigger(
        &self,
        database_id: &str,
        collection_id: &str,
        definition: &TriggerDefinition,
    ) -> AppResult<()> {
        self.with_collection(database_id, collection_id, |coll| {
            match coll.triggers.entry(definition.id.clone()) {
                Entry::Occupied(_) => Err(AppError::conflict(format!(
                    "Trigger '{}' already exists",
                    definition.id
                ))),
                Entry::Vacant(entry) => {
                    entry.insert(definition.clone());
                    Ok(())
                }
            }
        })
    }
}
