use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::{MemoryStore, MongoStore, Store, StoreError};

/// Shared per-process state handed to every handler. The store handle is
/// the only cross-request dependency; handlers themselves are stateless.
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    /// Build state from configuration: MongoDB when a URI is configured,
    /// otherwise the in-memory store.
    pub async fn from_config(config: &AppConfig) -> Result<Arc<Self>, StoreError> {
        let store: Arc<dyn Store> = match &config.database.mongo_uri {
            Some(uri) => {
                Arc::new(MongoStore::connect(uri, &config.database.database_name).await?)
            }
            None => {
                tracing::warn!("MONGO_URI not set, using in-memory store (data is not persisted)");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Arc::new(Self { store }))
    }

    pub fn with_store(store: Arc<dyn Store>) -> Arc<Self> {
        Arc::new(Self { store })
    }
}
