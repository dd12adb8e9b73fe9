//! DocStore Demo — typed repository over a document store
//!
//! Entry point that wires configuration, logging, and a repository over the
//! in-memory store client, then exercises one CRUD + query + procedure
//! cycle. Point a vendor SDK adapter at the same wiring to run against a
//! real store account.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, fmt};

use docstore_client::MemoryStore;
use docstore_core::config::AppConfig;
use docstore_core::error::AppError;
use docstore_core::traits::entity::DocumentEntity;
use docstore_core::types::filter::{Filter, FilterOp};
use docstore_core::types::script::{
    ProcedureDefinition, TriggerDefinition, TriggerOperation, TriggerType,
};
use docstore_repository::DocumentRepository;

/// The demo document type: one to-do item.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TodoItem {
    id: String,
    name: String,
    description: String,
    completed: bool,
}

impl DocumentEntity for TodoItem {
    fn document_id(&self) -> &str {
        &self.id
    }
}

/// Stored procedure registered by the demo. Bodies are written in the
/// store's scripting language; the in-memory client stores them verbatim.
const GREETING_PROCEDURE: &str = r#"function userProcedure() {
    var response = getContext().getResponse();
    response.setBody("Hello World");
}"#;

/// Pre-create trigger that stamps a timestamp onto incoming documents.
const TIMESTAMP_TRIGGER: &str = r#"function validate() {
    var request = getContext().getRequest();
    var documentToCreate = request.getBody();
    if (!('timestamp' in documentToCreate)) {
        documentToCreate['timestamp'] = new Date().getTime();
    }
    request.setBody(documentToCreate);
}"#;

#[tokio::main]
async fn main() {
    let env = std::env::var("DOCSTORE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Demo error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main demo run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DocStore demo v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        endpoint = %config.store.endpoint,
        database = %config.store.database_id,
        collection = %config.store.collection_id,
        "Connecting to document store"
    );

    let store = Arc::new(MemoryStore::new());
    let repository: DocumentRepository<TodoItem> =
        DocumentRepository::new(store, &config.store).await?;
    tracing::info!("Repository provisioned");

    let item = TodoItem {
        id: "1".to_string(),
        name: "Pick up groceries".to_string(),
        description: "Milk, eggs, coffee".to_string(),
        completed: false,
    };
    let created = repository.create(&item).await?;
    tracing::info!(id = %created.id, "Created document");

    let fetched = repository.get("1").await?;
    tracing::info!(found = fetched.is_some(), "Read document back");

    let open_items = repository
        .query(&Filter::matching("completed", FilterOp::Eq, false))
        .await?;
    tracing::info!(count = open_items.len(), "Queried open items");

    repository
        .register_procedure(&ProcedureDefinition::new(
            "UserCreatedStoredProcedure",
            GREETING_PROCEDURE,
        ))
        .await?;
    let result: String = repository
        .execute_procedure("UserCreatedStoredProcedure", &[])
        .await?;
    tracing::info!(result = %result, "Executed stored procedure");

    repository
        .register_trigger(&TriggerDefinition::new(
            "UserCreatedTrigger",
            TIMESTAMP_TRIGGER,
            TriggerType::Pre,
            TriggerOperation::Create,
        ))
        .await?;
    tracing::info!("Registered pre-create trigger");

    repository.delete("1").await?;
    tracing::info!("Deleted document, demo complete");

    Ok(())
}
