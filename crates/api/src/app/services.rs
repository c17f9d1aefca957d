use std::sync::Arc;

use anyhow::Context;

use pharmastock_infra::{
    store::MongoPharmacyStore, AppConfig, PharmacyQueries, PharmacyStore,
};

/// Type-erased store handle shared by all requests.
pub type SharedStore = Arc<dyn PharmacyStore>;

/// Request-independent services handed to every handler.
#[derive(Clone)]
pub struct AppServices {
    queries: Arc<PharmacyQueries<SharedStore>>,
}

impl AppServices {
    pub fn new(store: SharedStore) -> Self {
        Self {
            queries: Arc::new(PharmacyQueries::new(store)),
        }
    }

    pub fn queries(&self) -> &PharmacyQueries<SharedStore> {
        &self.queries
    }
}

/// Connect to the configured document store.
///
/// Fails (and the process exits) when the store cannot be reached.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let store = MongoPharmacyStore::connect(&config.store)
        .await
        .with_context(|| format!("failed to connect to database {:?}", config.store.database))?;
    Ok(AppServices::new(Arc::new(store)))
}
