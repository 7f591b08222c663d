use std::sync::Arc;

use crate::booking::BookingEngine;
use crate::core::Config;
use crate::db::CatalogStore;

/// Shared server state handed to every request handler.
///
/// Holds singleton references to the catalog store and the booking engine.
/// `Clone` is a shallow copy; everything behind it is `Arc`-shared.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | immutable configuration |
/// | store | Arc<CatalogStore> | in-memory catalog store |
/// | booking | Arc<BookingEngine> | per-item serialized booking engine |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Catalog store (categories, items, pricing, bookings)
    pub store: Arc<CatalogStore>,
    /// Booking engine (shares the store)
    pub booking: Arc<BookingEngine>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish()
    }
}

impl ServerState {
    /// Create server state from pre-built components.
    pub fn new(config: Config, store: Arc<CatalogStore>) -> Self {
        let booking = Arc::new(BookingEngine::new(store.clone()));
        Self {
            config,
            store,
            booking,
        }
    }

    /// Initialize server state from configuration, optionally seeding the
    /// demo catalog.
    pub fn initialize(config: &Config) -> Self {
        let store = Arc::new(CatalogStore::new());

        if config.seed_demo_data {
            crate::db::seed::seed_demo_catalog(&store);
            tracing::info!("Demo catalog seeded");
        }

        Self::new(config.clone(), store)
    }
}
