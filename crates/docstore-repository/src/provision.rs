//! Idempotent provisioning of the target database and collection.
//!
//! Runs once per repository construction. A pre-existing resource
//! short-circuits with no mutation; losing a create race to a concurrent
//! provisioner is success-equivalent. Every other failure is fatal to
//! construction.

use tracing::info;

use docstore_core::config::StoreConfig;
use docstore_core::result::AppResult;
use docstore_core::traits::store::DocumentStore;

/// Ensure the configured database and collection exist, in that order.
pub async fn provision(store: &dyn DocumentStore, config: &StoreConfig) -> AppResult<()> {
    ensure_database(store, &config.database_id).await?;
    ensure_collection(
        store,
        &config.database_id,
        &config.collection_id,
        config.default_throughput,
    )
    .await
}

/// Ensure the database exists, creating it on first use.
pub async fn ensure_database(store: &dyn DocumentStore, database_id: &str) -> AppResult<()> {
    match store.read_database(database_id).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_not_found() => {
            info!(database = database_id, "Database not found, creating");
            match store.create_database(database_id).await {
                Ok(()) => {
                    info!(database = database_id, "Database created");
                    Ok(())
                }
                // A concurrent provisioner won the create race.
                Err(e) if e.is_conflict() => Ok(()),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

/// Ensure the collection exists under the database, creating it with the
/// given throughput on first use.
///
/// Must run after [`ensure_database`]; a missing database surfaces as a
/// not-found failure from the create call.
pub async fn ensure_collection(
    store: &dyn DocumentStore,
    database_id: &str,
    collection_id: &str,
    throughput: u32,
) -> AppResult<()> {
    match store.read_collection(database_id, collection_id).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_not_found() => {
            info!(
                database = database_id,
                collection = collection_id,
                throughput,
                "Collection not found, creating"
            );
            match store
                .create_collection(database_id, collection_id, throughput)
                .await
            {
                Ok(()) => {
                    info!(
                        database = database_id,
                        collection = collection_id,
                        "Collection created"
                    );
                    Ok(())
                }
                Err(e) if e.is_conflict() => Ok(()),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}
