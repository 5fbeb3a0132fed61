//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedCatalogClient;
use crate::planner::PlanConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached site-catalogue client
    pub catalog: Arc<CachedCatalogClient>,

    /// Itinerary planner configuration
    pub config: Arc<PlanConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: CachedCatalogClient, config: PlanConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }
}
